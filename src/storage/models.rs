//! Storage record models for the trending store.
//!
//! These types are separate from the domain [`TrendingEntry`] so that
//! storage-only fields (timestamps) stay out of the view state.

use crate::domain::TrendingEntry;
use serde::{Deserialize, Serialize};

/// A trending document as held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingRecord {
    /// Store-assigned identifier.
    pub id: String,

    /// Exact search term; unique across the store.
    pub search_term: String,

    /// Number of successful searches for the term.
    pub count: u32,

    /// Poster of the first result recorded for the term.
    pub poster_url: String,

    /// Catalog id of the first result recorded for the term.
    pub movie_id: i64,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Unix timestamp of the last count change.
    pub updated_at: i64,
}

impl TrendingRecord {
    /// Converts the record into the domain entry shown in the trending strip.
    #[must_use]
    pub fn into_entry(self) -> TrendingEntry {
        TrendingEntry {
            id: self.id,
            search_term: self.search_term,
            count: self.count,
            poster_url: self.poster_url,
            movie_id: self.movie_id,
        }
    }
}

/// Fields supplied when a term is recorded for the first time.
///
/// The store assigns the id and timestamps and starts the count at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrendingRecord {
    pub search_term: String,
    pub poster_url: String,
    pub movie_id: i64,
}

impl NewTrendingRecord {
    pub fn new(search_term: impl Into<String>, poster_url: impl Into<String>, movie_id: i64) -> Self {
        Self {
            search_term: search_term.into(),
            poster_url: poster_url.into(),
            movie_id,
        }
    }
}
