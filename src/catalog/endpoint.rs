//! Catalog endpoint selection.
//!
//! An empty search term asks the catalog for popular movies; anything else is
//! a free-text search with the term percent-encoded into the query string.

/// Default catalog base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// The two catalog requests cinefind issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEndpoint {
    /// `GET /discover/movie?sort_by=popularity.desc`
    Discover,
    /// `GET /search/movie?query=<term>`
    Search(String),
}

impl CatalogEndpoint {
    /// Picks the endpoint for a settled search term.
    #[must_use]
    pub fn for_term(term: &str) -> Self {
        if term.is_empty() {
            Self::Discover
        } else {
            Self::Search(term.to_string())
        }
    }

    /// Returns the path and query string, relative to the base URL.
    ///
    /// ```
    /// use cinefind::catalog::CatalogEndpoint;
    ///
    /// assert_eq!(CatalogEndpoint::for_term("").path_and_query(), "/discover/movie?sort_by=popularity.desc");
    /// assert_eq!(CatalogEndpoint::for_term("el padrino").path_and_query(), "/search/movie?query=el%20padrino");
    /// ```
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self {
            Self::Discover => "/discover/movie?sort_by=popularity.desc".to_string(),
            Self::Search(term) => format!("/search/movie?query={}", urlencoding::encode(term)),
        }
    }

    /// Returns the absolute URL under `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path_and_query())
    }
}
