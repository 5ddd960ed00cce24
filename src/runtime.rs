//! Async driver connecting the term store, the catalog, the trending worker
//! and a render sink.
//!
//! The runtime loop is the only owner of [`AppState`]. Everything that can
//! take time runs elsewhere and reports back through a channel:
//!
//! - live and settled terms arrive from the [`SearchTermStore`] watch channels
//! - each `FetchMovies` action runs as a spawned task and sends its
//!   `(seq, QueryResult)` back
//! - trending work goes to the worker task, whose responses come back as
//!   events

use crate::app::{handle_event, Action, AppState, Event, SearchTermStore};
use crate::catalog::MovieQueryService;
use crate::domain::QueryResult;
use crate::ui::{RenderProps, RenderSink};
use crate::worker::{TrendingRecorder, WorkerHandle, WorkerResponse};
use std::future::Future;
use tokio::sync::mpsc;
use tracing::Instrument;

type QueryOutcome = (u64, QueryResult);

/// Owns the application state and executes the handler's actions.
pub struct Runtime<S: RenderSink> {
    state: AppState,
    terms: SearchTermStore,
    service: MovieQueryService,
    worker: WorkerHandle,
    worker_rx: mpsc::UnboundedReceiver<WorkerResponse>,
    query_tx: mpsc::UnboundedSender<QueryOutcome>,
    query_rx: mpsc::UnboundedReceiver<QueryOutcome>,
    sink: S,
}

impl<S: RenderSink> Runtime<S> {
    /// Wires the components together and starts the trending worker.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(terms: SearchTermStore, service: MovieQueryService, recorder: TrendingRecorder, sink: S) -> Self {
        let (worker_tx, worker_rx) = mpsc::unbounded_channel();
        let worker = recorder.spawn(worker_tx);
        let (query_tx, query_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::new(),
            terms,
            service,
            worker,
            worker_rx,
            query_tx,
            query_rx,
            sink,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs until `shutdown` completes, then returns the final state.
    ///
    /// After shutdown is requested the loop keeps going until the last typed
    /// term has settled and its query has answered, so piped input is fully
    /// processed. Pending trending writes are flushed before returning.
    pub async fn run<F>(mut self, shutdown: F) -> AppState
    where
        F: Future<Output = ()>,
    {
        let mut live = self.terms.subscribe_live();
        let mut settled = self.terms.subscribe_settled();
        let mut draining = false;
        tokio::pin!(shutdown);

        self.dispatch(&Event::Mounted);

        loop {
            tokio::select! {
                () = &mut shutdown, if !draining => {
                    tracing::debug!("shutdown requested");
                    draining = true;
                }
                changed = live.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let term = live.borrow_and_update().clone();
                    self.dispatch(&Event::TermTyped(term));
                }
                changed = settled.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let term = settled.borrow_and_update().clone();
                    self.dispatch(&Event::TermSettled(term));
                }
                Some((seq, result)) = self.query_rx.recv() => {
                    self.dispatch(&Event::QueryFinished { seq, result });
                }
                Some(response) = self.worker_rx.recv() => {
                    self.dispatch(&Event::WorkerResponse(response));
                }
            }

            if draining && self.is_quiescent() {
                break;
            }
        }

        tracing::debug!("runtime loop finished, draining trending worker");
        self.worker.shutdown().await;
        while let Ok(response) = self.worker_rx.try_recv() {
            handle_event(&mut self.state, &Event::WorkerResponse(response));
        }

        self.state
    }

    /// No keystroke waiting to settle and no query in flight.
    fn is_quiescent(&self) -> bool {
        !self.state.is_loading() && self.terms.live() == self.state.settled_term
    }

    fn dispatch(&mut self, event: &Event) {
        let (should_render, actions) = handle_event(&mut self.state, event);

        for action in actions {
            self.execute(action);
        }

        if should_render {
            self.render();
        }
    }

    fn execute(&self, action: Action) {
        match action {
            Action::FetchMovies { seq, term } => {
                let service = self.service.clone();
                let tx = self.query_tx.clone();
                let span = tracing::debug_span!("fetch_movies", seq = seq, term = %term);

                tokio::spawn(
                    async move {
                        let result = service.search(&term).await;
                        if tx.send((seq, result)).is_err() {
                            tracing::debug!("runtime stopped before query finished");
                        }
                    }
                    .instrument(span),
                );
            }
            Action::PostToWorker(message) => {
                if let Err(e) = self.worker.post(message) {
                    tracing::error!(error = %e, "failed to post to trending worker");
                }
            }
        }
    }

    fn render(&mut self) {
        let props = RenderProps {
            search_term: self.state.search_term.clone(),
            set_search_term: self.terms.setter(),
            movies: self.state.movies.clone(),
            trending_movies: self.state.trending_movies.clone(),
            is_loading: self.state.is_loading(),
            error_message: self.state.error_message.clone(),
        };

        if let Err(e) = self.sink.render(&props) {
            tracing::error!(error = %e, "render failed");
        }
    }
}

impl<S: RenderSink> std::fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("state", &self.state)
            .field("terms", &self.terms)
            .finish_non_exhaustive()
    }
}
