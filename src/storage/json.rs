//! JSON file-based trending store.
//!
//! Keeps every trending document in memory and persists the whole set with an
//! atomic file write (write-to-temp + rename) after each change. Counter
//! increments happen under the store's lock, so unlike the remote backend they
//! never lose updates within one process.
//!
//! Saves go through `tokio::fs` after the data lock is released. A separate
//! async save lock serializes writers, and each writer snapshots the data
//! only once it holds that lock, so the file always ends at the newest state.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "next_id": 3,
//!   "documents": {
//!     "batman": {
//!       "id": "1",
//!       "search_term": "batman",
//!       "count": 4,
//!       "poster_url": "https://image.tmdb.org/t/p/w500/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg",
//!       "movie_id": 268,
//!       "created_at": 1760000000,
//!       "updated_at": 1760000500
//!     }
//!   }
//! }
//! ```

use crate::domain::error::{CinefindError, Result};
use crate::storage::backend::TrendingStore;
use crate::storage::models::{NewTrendingRecord, TrendingRecord};
use crate::storage::ranking;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Mutex as AsyncMutex;
use tracing::Instrument;

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Next identifier to hand out.
    #[serde(default = "first_id")]
    next_id: u64,

    /// Documents indexed by search term.
    #[serde(default)]
    documents: HashMap<String, TrendingRecord>,
}

const fn first_id() -> u64 {
    1
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            next_id: first_id(),
            documents: HashMap::new(),
        }
    }
}

/// Trending store persisted to a single JSON file.
///
/// Cheap to share behind an `Arc`; all access goes through an internal mutex
/// that is never held across an `.await`.
pub struct JsonTrendingStore {
    file_path: PathBuf,
    data: Mutex<StorageData>,
    save_lock: AsyncMutex<()>,
}

impl JsonTrendingStore {
    /// Creates or opens a JSON trending store.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON trending store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StorageData::default()
        };

        tracing::debug!(document_count = data.documents.len(), "trending store initialized");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
            save_lock: AsyncMutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| CinefindError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, documents = data.documents.len(), "loaded trending data");
        Ok(data)
    }

    /// Writes the current documents to a temporary sibling file, then renames
    /// it into place.
    async fn save(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;

        let json = {
            let data = self.lock()?;
            serde_json::to_string_pretty(&*data)
                .map_err(|e| CinefindError::Storage(format!("failed to serialize JSON: {e}")))?
        };

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.file_path).await?;

        tracing::debug!(path = ?self.file_path, "trending store saved");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StorageData>> {
        self.data
            .lock()
            .map_err(|_| CinefindError::Storage("trending store lock poisoned".to_string()))
    }

    fn insert_new(&self, record: NewTrendingRecord) -> Result<TrendingRecord> {
        let mut data = self.lock()?;
        if data.documents.contains_key(&record.search_term) {
            return Err(CinefindError::Storage(format!(
                "trending document already exists: {}",
                record.search_term
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let created = TrendingRecord {
            id: data.next_id.to_string(),
            search_term: record.search_term,
            count: 1,
            poster_url: record.poster_url,
            movie_id: record.movie_id,
            created_at: now,
            updated_at: now,
        };

        data.next_id = data.next_id.saturating_add(1);
        data.documents.insert(created.search_term.clone(), created.clone());
        Ok(created)
    }

    fn bump_count(&self, id: &str) -> Result<TrendingRecord> {
        let mut data = self.lock()?;
        let document = data
            .documents
            .values_mut()
            .find(|document| document.id == id)
            .ok_or_else(|| CinefindError::Storage(format!("trending document not found: {id}")))?;

        document.count = document.count.saturating_add(1);
        document.updated_at = chrono::Utc::now().timestamp();
        Ok(document.clone())
    }
}

#[async_trait]
impl TrendingStore for JsonTrendingStore {
    async fn find_by_term(&self, search_term: &str) -> Result<Option<TrendingRecord>> {
        let _span = tracing::debug_span!("json_find_by_term", search_term = %search_term).entered();

        let record = self.lock()?.documents.get(search_term).cloned();

        tracing::debug!(found = record.is_some(), "trending lookup complete");
        Ok(record)
    }

    async fn create(&self, record: NewTrendingRecord) -> Result<TrendingRecord> {
        let span = tracing::debug_span!("json_create", search_term = %record.search_term);

        async {
            let created = self.insert_new(record)?;
            self.save().await?;

            tracing::debug!(id = %created.id, "trending document created");
            Ok::<_, CinefindError>(created)
        }
        .instrument(span)
        .await
    }

    async fn increment_count(&self, record: &TrendingRecord) -> Result<TrendingRecord> {
        let span = tracing::debug_span!("json_increment_count", id = %record.id);

        async {
            let updated = self.bump_count(&record.id)?;
            self.save().await?;

            tracing::debug!(new_count = updated.count, "trending count incremented");
            Ok::<_, CinefindError>(updated)
        }
        .instrument(span)
        .await
    }

    async fn list_top(&self, limit: usize) -> Result<Vec<TrendingRecord>> {
        let _span = tracing::debug_span!("json_list_top", limit = limit).entered();

        let records: Vec<TrendingRecord> = self.lock()?.documents.values().cloned().collect();
        let top = ranking::top_n(records, limit);

        tracing::debug!(count = top.len(), "retrieved top trending documents");
        Ok(top)
    }
}

impl std::fmt::Debug for JsonTrendingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonTrendingStore").field("file_path", &self.file_path).finish_non_exhaustive()
    }
}
