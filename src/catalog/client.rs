//! HTTP transport for the catalog API.
//!
//! [`CatalogTransport`] is the seam between the query policy in
//! [`MovieQueryService`](super::MovieQueryService) and the network. The
//! production implementation, [`HttpCatalog`], issues authenticated `GET`
//! requests with `reqwest`.

use super::response::RawResponse;
use crate::domain::QueryError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::Instrument;

/// Something that can fetch a catalog URL.
///
/// Implementations return the raw status and body; classification happens in
/// [`parse_response`](super::parse_response). An `Err` means no response was
/// received at all.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Issues a `GET` for the absolute `url`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] when the request fails before a
    /// response arrives.
    async fn get(&self, url: &str) -> Result<RawResponse, QueryError>;
}

/// `reqwest`-backed catalog transport with a static bearer token.
pub struct HttpCatalog {
    http: reqwest::Client,
    token: String,
}

impl HttpCatalog {
    /// Creates a transport that authenticates every request with `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), token)
    }

    /// Creates a transport reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, token: impl Into<String>) -> Self {
        Self { http, token: token.into() }
    }
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog").field("token", &"<redacted>").finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalog {
    async fn get(&self, url: &str) -> Result<RawResponse, QueryError> {
        let span = tracing::debug_span!("catalog_get", url = %url);

        async {
            let response = self
                .http
                .get(url)
                .header(ACCEPT, "application/json")
                .header(AUTHORIZATION, format!("Bearer {}", self.token))
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();

            tracing::debug!(status = status, body_len = body.len(), "catalog responded");
            Ok::<_, QueryError>(RawResponse { status, body })
        }
        .instrument(span)
        .await
    }
}
