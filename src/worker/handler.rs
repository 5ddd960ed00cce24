//! Trending recorder and its background worker task.
//!
//! [`TrendingRecorder`] owns the trending store. Its public operations never
//! fail: store errors are logged and swallowed, because trending is a side
//! channel that must not disturb search results or the loading indicator.
//! [`TrendingRecorder::spawn`] runs the recorder as a task that processes
//! [`WorkerMessage`]s one at a time.

use crate::domain::error::{CinefindError, Result};
use crate::domain::{poster_url_for, MovieSummary, TrendingEntry};
use crate::storage::models::{NewTrendingRecord, TrendingRecord};
use crate::storage::ranking::DEFAULT_TRENDING_LIMIT;
use crate::storage::TrendingStore;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Default base URL prepended to catalog poster paths.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Records successful searches and loads the trending list.
#[derive(Clone)]
pub struct TrendingRecorder {
    store: Arc<dyn TrendingStore>,
    image_base_url: String,
    limit: usize,
}

impl TrendingRecorder {
    /// Creates a recorder with the default poster base URL and a top-5 limit.
    pub fn new(store: Arc<dyn TrendingStore>) -> Self {
        Self {
            store,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            limit: DEFAULT_TRENDING_LIMIT,
        }
    }

    #[must_use]
    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Counts a successful search for `search_term`.
    ///
    /// Creates the entry with a count of 1 on first sight, otherwise
    /// increments it. Failures are logged and otherwise ignored.
    pub async fn record(&self, search_term: &str, first_result: &MovieSummary) {
        if let Err(e) = self.try_record(search_term, first_result).await {
            tracing::error!(search_term = %search_term, error = %e, "failed to record trending search");
        }
    }

    /// Loads the top trending entries, highest count first.
    ///
    /// Returns an empty list if the store cannot be read.
    pub async fn load_top_trending(&self) -> Vec<TrendingEntry> {
        match self.try_load_top_trending().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "failed to load trending searches");
                Vec::new()
            }
        }
    }

    async fn try_record(&self, search_term: &str, first_result: &MovieSummary) -> Result<TrendingRecord> {
        match self.store.find_by_term(search_term).await? {
            Some(existing) => {
                tracing::debug!(search_term = %search_term, count = existing.count, "incrementing trending count");
                self.store.increment_count(&existing).await
            }
            None => {
                let poster_url = poster_url_for(&self.image_base_url, first_result);
                tracing::debug!(search_term = %search_term, poster_url = %poster_url, "creating trending entry");
                self.store
                    .create(NewTrendingRecord::new(search_term, poster_url, first_result.id))
                    .await
            }
        }
    }

    async fn try_load_top_trending(&self) -> Result<Vec<TrendingEntry>> {
        let records = self.store.list_top(self.limit).await?;
        Ok(records
            .into_iter()
            .take(self.limit)
            .map(TrendingRecord::into_entry)
            .collect())
    }

    /// Helper for handling store results with consistent logging.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "trending operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::error!(operation = operation, error = %e, "trending operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Processes a worker message and returns the appropriate response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = message_name(&message));

        async {
            match message {
                WorkerMessage::RecordSearch { search_term, movie } => {
                    let result = self.try_record(&search_term, &movie).await;
                    Self::handle_db_result("record search", result, |record| WorkerResponse::SearchRecorded {
                        search_term: record.search_term,
                        count: record.count,
                    })
                }
                WorkerMessage::LoadTrending => {
                    let result = self.try_load_top_trending().await;
                    Self::handle_db_result("load trending", result, |entries| {
                        tracing::debug!(entry_count = entries.len(), "trending loaded");
                        WorkerResponse::TrendingLoaded { entries }
                    })
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs the recorder as a background task.
    ///
    /// Messages are handled in arrival order; each response is sent on
    /// `responses`. The task ends when every [`WorkerHandle`] is dropped or
    /// the response receiver goes away.
    pub fn spawn(self, responses: mpsc::UnboundedSender<WorkerResponse>) -> WorkerHandle {
        let (tx, mut rx) = mpsc::unbounded_channel::<WorkerMessage>();

        let task = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let response = self.handle_message(message).await;
                if responses.send(response).is_err() {
                    tracing::debug!("response receiver dropped, stopping trending worker");
                    break;
                }
            }
            tracing::debug!("trending worker stopped");
        });

        WorkerHandle { tx, task }
    }
}

const fn message_name(message: &WorkerMessage) -> &'static str {
    match message {
        WorkerMessage::RecordSearch { .. } => "record_search",
        WorkerMessage::LoadTrending => "load_trending",
    }
}

impl std::fmt::Debug for TrendingRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendingRecorder")
            .field("image_base_url", &self.image_base_url)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// Sending side of a running trending worker.
#[derive(Debug)]
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<WorkerMessage>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Queues a message for the worker without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Worker`] if the worker task has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|e| CinefindError::Worker(format!("trending worker unavailable: {e}")))
    }

    /// Closes the queue and waits for pending messages to finish.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "trending worker panicked");
        }
    }
}
