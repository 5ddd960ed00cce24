//! Trending store abstraction.
//!
//! The [`TrendingStore`] trait is the minimal document-store surface the
//! trending recorder needs: look a term up, create a document, bump its
//! counter, and list the top documents by count.

use crate::domain::error::Result;
use crate::storage::models::{NewTrendingRecord, TrendingRecord};
use async_trait::async_trait;

/// Abstraction over trending document stores.
///
/// # Implementations
///
/// - [`JsonTrendingStore`](super::JsonTrendingStore): local JSON file
/// - [`AppwriteTrendingStore`](super::AppwriteTrendingStore): Appwrite Databases REST API
#[async_trait]
pub trait TrendingStore: Send + Sync {
    /// Finds the document for an exact search term.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn find_by_term(&self, search_term: &str) -> Result<Option<TrendingRecord>>;

    /// Creates a document with a count of 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or, for stores that enforce it,
    /// the term already exists.
    async fn create(&self, record: NewTrendingRecord) -> Result<TrendingRecord>;

    /// Increments the count of an existing document by one and returns the
    /// updated document.
    ///
    /// Remote stores compute the new value from `record.count`, so two
    /// concurrent increments of the same document may count once.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or the write fails.
    async fn increment_count(&self, record: &TrendingRecord) -> Result<TrendingRecord>;

    /// Lists at most `limit` documents, highest count first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn list_top(&self, limit: usize) -> Result<Vec<TrendingRecord>>;
}
