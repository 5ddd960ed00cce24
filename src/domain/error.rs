//! Error types for cinefind.
//!
//! This module defines the crate-wide error type [`CinefindError`], the
//! [`Result`] alias used throughout the crate, and [`QueryError`], the failure
//! side of a catalog query. All errors are implemented using the `thiserror`
//! crate.

use thiserror::Error;

/// Message shown to the user when a catalog query fails for any reason the
/// API did not explain itself.
pub const GENERIC_QUERY_ERROR: &str = "Error buscando tu película. Porfavor intenta más tarde.";

/// The main error type for cinefind operations.
///
/// Consolidates configuration, storage, and transport failures. Catalog query
/// failures are modelled separately by [`QueryError`] because they are never
/// propagated; they are converted into a user-facing message instead.
///
/// # Examples
///
/// ```
/// use cinefind::CinefindError;
///
/// fn validate_config() -> Result<(), CinefindError> {
///     Err(CinefindError::Config("missing TMDB API token".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum CinefindError {
    /// Trending store operation failed.
    ///
    /// Occurs when reading from or writing to a trending document store fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP request to a remote service failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON document could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Communication with the trending worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for cinefind operations.
pub type Result<T> = std::result::Result<T, CinefindError>;

/// Failure of a single catalog query.
///
/// The `Display` text is meant for logs. What the user sees is decided by
/// [`QueryError::user_message`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// The catalog answered with a status outside the success range.
    #[error("Error buscando películas (HTTP {status})")]
    Status {
        /// HTTP status code returned by the catalog.
        status: u16,
    },

    /// The catalog answered with `success: false`.
    #[error("catalog reported failure: {}", message.as_deref().unwrap_or("<no message>"))]
    Api {
        /// The `error` field of the response body, if present.
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QueryError {
    /// Returns the localized message displayed in place of the movie list.
    ///
    /// Only an API-reported failure with its own message is shown verbatim;
    /// every other failure collapses to [`GENERIC_QUERY_ERROR`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message: Some(message) } if !message.is_empty() => message.clone(),
            _ => GENERIC_QUERY_ERROR.to_string(),
        }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failures_show_generic_message() {
        let error = QueryError::Status { status: 500 };
        assert_eq!(error.to_string(), "Error buscando películas (HTTP 500)");
        assert_eq!(error.user_message(), GENERIC_QUERY_ERROR);
    }

    #[test]
    fn api_failures_prefer_their_own_message() {
        let error = QueryError::Api { message: Some("Invalid API key".to_string()) };
        assert_eq!(error.user_message(), "Invalid API key");

        let silent = QueryError::Api { message: None };
        assert_eq!(silent.user_message(), GENERIC_QUERY_ERROR);

        let blank = QueryError::Api { message: Some(String::new()) };
        assert_eq!(blank.user_message(), GENERIC_QUERY_ERROR);
    }
}
