//! Movie query service.
//!
//! Applies the result policy on top of a [`CatalogTransport`]: every failure is
//! logged and converted into [`QueryResult::Failure`] with a user-facing
//! message, so callers never see an error value.

use super::client::CatalogTransport;
use super::endpoint::{CatalogEndpoint, DEFAULT_API_BASE_URL};
use super::response::parse_response;
use crate::domain::{MovieSummary, QueryError, QueryResult};
use std::sync::Arc;
use tracing::Instrument;

/// Searches the catalog, or lists popular movies for an empty term.
#[derive(Clone)]
pub struct MovieQueryService {
    transport: Arc<dyn CatalogTransport>,
    base_url: String,
}

impl MovieQueryService {
    /// Creates a service against the default TMDB base URL.
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self::with_base_url(transport, DEFAULT_API_BASE_URL)
    }

    /// Creates a service against a custom base URL.
    pub fn with_base_url(transport: Arc<dyn CatalogTransport>, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs one query for `term`.
    ///
    /// Never fails; see [`parse_response`] for how responses are classified
    /// and [`QueryError::user_message`] for the message a failure carries.
    pub async fn search(&self, term: &str) -> QueryResult {
        let endpoint = CatalogEndpoint::for_term(term);
        let url = endpoint.url(&self.base_url);

        let span = tracing::debug_span!("movie_query", term = %term, endpoint = ?endpoint);

        async {
            match self.fetch(&url).await {
                Ok(movies) => {
                    tracing::debug!(result_count = movies.len(), "movie query succeeded");
                    QueryResult::Success(movies)
                }
                Err(e) => {
                    tracing::error!(error = %e, url = %url, "Error fetching movies");
                    QueryResult::Failure(e.user_message())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<MovieSummary>, QueryError> {
        let response = self.transport.get(url).await?;
        parse_response(&response)
    }
}

impl std::fmt::Debug for MovieQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieQueryService").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}
