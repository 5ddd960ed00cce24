//! Trending worker message types.
//!
//! The runtime never awaits trending-store calls itself. It posts a
//! [`WorkerMessage`] and, some time later, receives a [`WorkerResponse`] as an
//! ordinary event.

use crate::domain::{MovieSummary, TrendingEntry};
use serde::{Deserialize, Serialize};

/// Requests sent from the runtime to the trending worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Count a successful, non-empty search.
    RecordSearch {
        /// The settled search term, used verbatim as the document key.
        search_term: String,

        /// First movie the search returned; supplies the poster and movie id
        /// when the term is recorded for the first time.
        movie: MovieSummary,
    },

    /// Load the most searched terms for the trending strip.
    LoadTrending,
}

impl WorkerMessage {
    /// Create a `RecordSearch` message.
    pub fn record_search(search_term: impl Into<String>, movie: MovieSummary) -> Self {
        Self::RecordSearch {
            search_term: search_term.into(),
            movie,
        }
    }

    /// Create a `LoadTrending` message.
    #[must_use]
    pub const fn load_trending() -> Self {
        Self::LoadTrending
    }
}

/// Responses sent from the trending worker back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A search was counted.
    SearchRecorded {
        search_term: String,
        /// Count after the update.
        count: u32,
    },

    /// Top trending entries, highest count first.
    TrendingLoaded { entries: Vec<TrendingEntry> },

    /// A store operation failed. Informational only.
    Error { message: String },
}
