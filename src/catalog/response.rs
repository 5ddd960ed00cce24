//! Catalog response classification.
//!
//! Turns a raw HTTP status and body into the list of movies or a
//! [`QueryError`]. Shape checks are deliberately shallow: only the status, the
//! `success` flag and the `results` array are looked at.

use crate::domain::{MovieSummary, QueryError};
use serde_json::Value;

/// Status and body of a catalog response, as received by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Classifies a catalog response.
///
/// 1. Non-2xx status: [`QueryError::Status`]
/// 2. Body is not JSON: [`QueryError::Decode`]
/// 3. `success == false`: [`QueryError::Api`] with the body's `error` text
/// 4. Otherwise the `results` array, or an empty list when it is missing or
///    not an array. Entries that are not movie objects are skipped.
///
/// # Errors
///
/// Returns the [`QueryError`] describing the first failed check.
pub fn parse_response(response: &RawResponse) -> Result<Vec<MovieSummary>, QueryError> {
    if !response.is_success() {
        return Err(QueryError::Status { status: response.status });
    }

    let body: Value = serde_json::from_slice(&response.body)?;

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body.get("error").and_then(Value::as_str).map(String::from);
        return Err(QueryError::Api { message });
    }

    let Some(results) = body.get("results").and_then(Value::as_array) else {
        tracing::debug!("catalog response has no results array, treating as empty");
        return Ok(Vec::new());
    };

    let movies = results
        .iter()
        .filter_map(|entry| match serde_json::from_value::<MovieSummary>(entry.clone()) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable catalog entry");
                None
            }
        })
        .collect();

    Ok(movies)
}
