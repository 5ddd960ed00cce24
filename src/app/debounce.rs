//! Debounced search term store.
//!
//! Holds two values: the live term, replaced on every keystroke, and the
//! settled term, which only follows the live term once it has stayed unchanged
//! for the debounce delay. Only the settled term drives catalog queries.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default delay between the last keystroke and the settled update.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Live and settled search terms, connected by a debounce task.
///
/// Must be created inside a Tokio runtime.
#[derive(Debug)]
pub struct SearchTermStore {
    live_tx: Arc<watch::Sender<String>>,
    settled_rx: watch::Receiver<String>,
    delay: Duration,
    task: JoinHandle<()>,
}

impl SearchTermStore {
    /// Starts a store with empty terms and the given debounce delay.
    #[must_use]
    pub fn spawn(delay: Duration) -> Self {
        let (live_tx, live_rx) = watch::channel(String::new());
        let (settled_tx, settled_rx) = watch::channel(String::new());

        let task = tokio::spawn(debounce(live_rx, settled_tx, delay));
        tracing::debug!(delay_ms = delay.as_millis(), "search term store started");

        Self {
            live_tx: Arc::new(live_tx),
            settled_rx,
            delay,
            task,
        }
    }

    /// Replaces the live term. Returns `false` if it already had that value.
    pub fn set(&self, term: impl Into<String>) -> bool {
        set_term(&self.live_tx, term.into())
    }

    #[must_use]
    pub fn live(&self) -> String {
        self.live_tx.borrow().clone()
    }

    #[must_use]
    pub fn settled(&self) -> String {
        self.settled_rx.borrow().clone()
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Receiver notified on every live change.
    #[must_use]
    pub fn subscribe_live(&self) -> watch::Receiver<String> {
        self.live_tx.subscribe()
    }

    /// Receiver notified when the settled term changes.
    #[must_use]
    pub fn subscribe_settled(&self) -> watch::Receiver<String> {
        self.settled_rx.clone()
    }

    /// A cloneable handle for updating the live term from elsewhere.
    #[must_use]
    pub fn setter(&self) -> TermSetter {
        TermSetter {
            live_tx: Arc::clone(&self.live_tx),
        }
    }

    /// Returns `true` once the debounce task has exited.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }
}

/// Cloneable handle that updates the live search term.
#[derive(Debug, Clone)]
pub struct TermSetter {
    live_tx: Arc<watch::Sender<String>>,
}

impl TermSetter {
    /// Replaces the live term. Returns `false` if it already had that value.
    pub fn set(&self, term: impl Into<String>) -> bool {
        set_term(&self.live_tx, term.into())
    }
}

fn set_term(tx: &watch::Sender<String>, term: String) -> bool {
    tx.send_if_modified(|current| {
        if *current == term {
            false
        } else {
            *current = term;
            true
        }
    })
}

/// Publishes the live term to `settled` once it has been quiet for `delay`.
///
/// Every change restarts the wait. Exits when all live senders are gone.
async fn debounce(mut live: watch::Receiver<String>, settled: watch::Sender<String>, delay: Duration) {
    while live.changed().await.is_ok() {
        loop {
            tokio::select! {
                changed = live.changed() => {
                    if changed.is_err() {
                        tracing::debug!("live term closed while debouncing");
                        return;
                    }
                }
                () = tokio::time::sleep(delay) => break,
            }
        }

        let term = live.borrow_and_update().clone();
        let updated = settled.send_if_modified(|current| {
            if *current == term {
                false
            } else {
                current.clone_from(&term);
                true
            }
        });

        tracing::debug!(term = %term, updated = updated, "search term settled");
    }

    tracing::debug!("debounce task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Instant};

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_settles_once_after_quiet_period() {
        let store = SearchTermStore::spawn(DEFAULT_DEBOUNCE);
        let mut settled = store.subscribe_settled();
        let start = Instant::now();

        for (i, term) in ["b", "ba", "bat", "batm"].into_iter().enumerate() {
            if i > 0 {
                advance(Duration::from_millis(100)).await;
            }
            store.set(term);
            settle().await;
        }

        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "batm");
        assert!(start.elapsed() >= Duration::from_millis(800));

        advance(Duration::from_secs(2)).await;
        settle().await;
        assert!(!settled.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_settled_value_does_not_notify() {
        let store = SearchTermStore::spawn(DEFAULT_DEBOUNCE);
        let mut settled = store.subscribe_settled();

        store.set("a");
        settle().await;
        advance(Duration::from_millis(100)).await;
        store.set("");
        settle().await;
        advance(Duration::from_millis(600)).await;
        settle().await;

        assert!(!settled.has_changed().unwrap());
        assert_eq!(store.settled(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn setter_updates_live_term() {
        let store = SearchTermStore::spawn(Duration::from_millis(50));
        let setter = store.setter();

        assert!(setter.set("dune"));
        assert!(!setter.set("dune"));
        assert_eq!(store.live(), "dune");
        assert_eq!(store.settled(), "");

        advance(Duration::from_millis(60)).await;
        settle().await;
        assert_eq!(store.settled(), "dune");
    }

    #[tokio::test(start_paused = true)]
    async fn task_stops_when_every_setter_is_dropped() {
        let store = SearchTermStore::spawn(DEFAULT_DEBOUNCE);
        let mut settled = store.subscribe_settled();
        drop(store);
        assert!(settled.changed().await.is_err());
    }
}
