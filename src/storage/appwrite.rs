//! Appwrite Databases trending store.
//!
//! Talks to a hosted Appwrite collection over its REST API. Each document has
//! the attributes `searchTerm` (string), `count` (integer), `poster_url`
//! (string) and `movie_id` (integer).
//!
//! Increments are read-modify-write: the new count is computed from the
//! document the caller looked up, so two near-simultaneous searches for the
//! same term may be counted once.

use crate::domain::error::{CinefindError, Result};
use crate::storage::backend::TrendingStore;
use crate::storage::models::{NewTrendingRecord, TrendingRecord};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Connection settings for an Appwrite collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteConfig {
    /// API endpoint including the version segment, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    /// Server API key. Omitted for collections readable and writable by any client.
    pub api_key: Option<String>,
}

/// Document shape returned by the Appwrite API.
#[derive(Debug, Deserialize)]
struct AppwriteDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: u32,
    #[serde(default)]
    poster_url: String,
    #[serde(default)]
    movie_id: i64,
    #[serde(rename = "$createdAt", default)]
    created_at: Option<String>,
    #[serde(rename = "$updatedAt", default)]
    updated_at: Option<String>,
}

impl AppwriteDocument {
    fn into_record(self) -> TrendingRecord {
        TrendingRecord {
            id: self.id,
            search_term: self.search_term,
            count: self.count,
            poster_url: self.poster_url,
            movie_id: self.movie_id,
            created_at: parse_timestamp(self.created_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<AppwriteDocument>,
}

#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    #[serde(default)]
    message: String,
}

fn parse_timestamp(value: Option<&str>) -> i64 {
    value
        .and_then(|v| chrono::DateTime::parse_from_rfc3339(v).ok())
        .map_or(0, |dt| dt.timestamp())
}

/// Appwrite query strings, in the JSON form accepted by Appwrite 1.5+.
mod query {
    use serde_json::json;

    pub fn equal(attribute: &str, value: &str) -> String {
        json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
    }

    pub fn order_desc(attribute: &str) -> String {
        json!({ "method": "orderDesc", "attribute": attribute }).to_string()
    }

    pub fn limit(limit: usize) -> String {
        json!({ "method": "limit", "values": [limit] }).to_string()
    }
}

/// Trending store backed by an Appwrite collection.
pub struct AppwriteTrendingStore {
    http: reqwest::Client,
    config: AppwriteConfig,
}

impl AppwriteTrendingStore {
    #[must_use]
    pub fn new(config: AppwriteConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, config: AppwriteConfig) -> Self {
        Self { http, config }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            self.config.collection_id
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header("X-Appwrite-Project", &self.config.project_id)
            .header(reqwest::header::ACCEPT, "application/json");

        match &self.config.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    /// Sends a request and decodes the JSON body, mapping non-2xx answers to
    /// [`CinefindError::Storage`] with Appwrite's own message.
    async fn send<T: serde::de::DeserializeOwned>(&self, builder: reqwest::RequestBuilder, operation: &str) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AppwriteErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(CinefindError::Storage(format!("{operation} failed ({}): {message}", status.as_u16())));
        }

        Ok(response.json::<T>().await?)
    }

    async fn list(&self, queries: &[String]) -> Result<Vec<TrendingRecord>> {
        let params: Vec<(&str, &str)> = queries.iter().map(|q| ("queries[]", q.as_str())).collect();
        let builder = self.request(reqwest::Method::GET, &self.documents_url()).query(&params);

        let list: DocumentList = self.send(builder, "list documents").await?;
        Ok(list.documents.into_iter().map(AppwriteDocument::into_record).collect())
    }
}

impl std::fmt::Debug for AppwriteTrendingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteTrendingStore")
            .field("endpoint", &self.config.endpoint)
            .field("project_id", &self.config.project_id)
            .field("collection_id", &self.config.collection_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TrendingStore for AppwriteTrendingStore {
    async fn find_by_term(&self, search_term: &str) -> Result<Option<TrendingRecord>> {
        let records = self.list(&[query::equal("searchTerm", search_term)]).await?;

        tracing::debug!(search_term = %search_term, found = !records.is_empty(), "appwrite lookup complete");
        Ok(records.into_iter().next())
    }

    async fn create(&self, record: NewTrendingRecord) -> Result<TrendingRecord> {
        let body = json!({
            "documentId": "unique()",
            "data": {
                "searchTerm": record.search_term,
                "count": 1,
                "poster_url": record.poster_url,
                "movie_id": record.movie_id,
            }
        });

        let builder = self.request(reqwest::Method::POST, &self.documents_url()).json(&body);
        let document: AppwriteDocument = self.send(builder, "create document").await?;

        tracing::debug!(id = %document.id, "appwrite document created");
        Ok(document.into_record())
    }

    async fn increment_count(&self, record: &TrendingRecord) -> Result<TrendingRecord> {
        let url = format!("{}/{}", self.documents_url(), record.id);
        let body = json!({ "data": { "count": record.count.saturating_add(1) } });

        let builder = self.request(reqwest::Method::PATCH, &url).json(&body);
        let document: AppwriteDocument = self.send(builder, "update document").await?;

        tracing::debug!(id = %document.id, new_count = document.count, "appwrite count updated");
        Ok(document.into_record())
    }

    async fn list_top(&self, limit: usize) -> Result<Vec<TrendingRecord>> {
        let records = self.list(&[query::order_desc("count"), query::limit(limit)]).await?;

        tracing::debug!(count = records.len(), "appwrite top trending loaded");
        Ok(records)
    }
}
