//! Side effects requested by the event handler.
//!
//! The handler never performs I/O. It returns a `Vec<Action>` and the runtime
//! executes each one: catalog queries run as spawned tasks whose results come
//! back as [`Event::QueryFinished`](crate::app::Event::QueryFinished), and
//! trending work is posted to the background worker.

use crate::worker::WorkerMessage;

/// Commands executed by the runtime after an event is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Query the catalog for `term` (discover when empty).
    ///
    /// The result must be reported back with the same `seq`.
    FetchMovies {
        /// Sequence number identifying this query cycle.
        seq: u64,
        /// Settled search term.
        term: String,
    },

    /// Posts a message to the trending worker without waiting for it.
    PostToWorker(WorkerMessage),
}
