//! Application state container.
//!
//! [`AppState`] is the single source of truth for what the render sink shows.
//! It is owned by the runtime loop and only mutated through the event handler,
//! so no locking is involved.
//!
//! # Query cycles
//!
//! Every query is tagged with a sequence number from [`AppState::begin_query`].
//! [`AppState::apply_query_result`] accepts a result only if its sequence
//! number is the one currently awaited; anything else is a stale answer to a
//! superseded query and is dropped without touching the view.

use super::modes::QueryPhase;
use crate::domain::{MovieSummary, QueryResult, TrendingEntry};

/// Central application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Live search term, updated on every keystroke.
    pub search_term: String,

    /// Last settled term a query was issued for.
    pub settled_term: String,

    /// Movies from the latest completed query, in catalog order.
    pub movies: Vec<MovieSummary>,

    /// Top trending entries, highest count first.
    pub trending_movies: Vec<TrendingEntry>,

    /// Message shown in place of the movie list after a failed query.
    pub error_message: Option<String>,

    /// Current query cycle.
    pub phase: QueryPhase,

    /// Set once the initial queries have been issued.
    pub mounted: bool,

    last_seq: u64,
}

/// Snapshot of the fields a render sink displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub movies: Vec<MovieSummary>,
    pub trending_movies: Vec<TrendingEntry>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the latest issued query has not answered.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Starts a new query cycle for `term` and returns its sequence number.
    ///
    /// Sets the loading flag and clears any previous error. A cycle already in
    /// flight is superseded.
    pub fn begin_query(&mut self, term: &str) -> u64 {
        self.last_seq += 1;
        let seq = self.last_seq;

        if let Some(previous) = self.phase.awaiting() {
            tracing::debug!(previous_seq = previous, seq = seq, "superseding in-flight query");
        }

        self.phase = QueryPhase::Loading {
            seq,
            term: term.to_string(),
        };
        self.error_message = None;
        seq
    }

    /// Applies the result of query `seq`.
    ///
    /// Returns the term of the completed cycle, or `None` if `seq` is not the
    /// query currently awaited, in which case nothing changes.
    pub fn apply_query_result(&mut self, seq: u64, result: QueryResult) -> Option<String> {
        let term = match &self.phase {
            QueryPhase::Loading { seq: awaited, term } if *awaited == seq => term.clone(),
            _ => {
                tracing::debug!(seq = seq, awaited = ?self.phase.awaiting(), "discarding stale query result");
                return None;
            }
        };

        match result {
            QueryResult::Success(movies) => {
                tracing::debug!(seq = seq, count = movies.len(), "query succeeded");
                self.movies = movies;
                self.error_message = None;
            }
            QueryResult::Failure(message) => {
                tracing::debug!(seq = seq, message = %message, "query failed");
                self.movies.clear();
                self.error_message = Some(message);
            }
        }

        self.phase = QueryPhase::Idle;
        Some(term)
    }

    /// Replaces the trending list. Returns `false` if it was unchanged.
    pub fn set_trending(&mut self, entries: &[TrendingEntry]) -> bool {
        if self.trending_movies == entries {
            return false;
        }
        self.trending_movies = entries.to_vec();
        true
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState {
            movies: self.movies.clone(),
            trending_movies: self.trending_movies.clone(),
            is_loading: self.is_loading(),
            error_message: self.error_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GENERIC_QUERY_ERROR;

    fn movies(n: i64) -> Vec<MovieSummary> {
        (1..=n).map(|id| MovieSummary::new(id, format!("Movie {id}"))).collect()
    }

    #[test]
    fn begin_query_sets_loading_and_clears_error() {
        let mut state = AppState::new();
        state.error_message = Some("old".to_string());

        let seq = state.begin_query("alien");

        assert_eq!(seq, 1);
        assert!(state.is_loading());
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn empty_success_and_failure_both_clear_movies() {
        let mut state = AppState::new();
        state.movies = movies(3);

        let seq = state.begin_query("nothing");
        state.apply_query_result(seq, QueryResult::Success(vec![]));
        assert!(state.movies.is_empty());
        assert_eq!(state.error_message, None);
        assert!(!state.is_loading());

        state.movies = movies(3);
        let seq = state.begin_query("broken");
        state.apply_query_result(seq, QueryResult::Failure(GENERIC_QUERY_ERROR.to_string()));
        assert!(state.movies.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(GENERIC_QUERY_ERROR));
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut state = AppState::new();
        let first = state.begin_query("bat");
        let second = state.begin_query("batman");

        assert_eq!(state.apply_query_result(first, QueryResult::Success(movies(7))), None);
        assert!(state.movies.is_empty());
        assert!(state.is_loading());

        assert_eq!(
            state.apply_query_result(second, QueryResult::Success(movies(2))),
            Some("batman".to_string())
        );
        assert_eq!(state.movies.len(), 2);

        // A late duplicate after the cycle closed is stale too.
        assert_eq!(state.apply_query_result(second, QueryResult::Failure("x".to_string())), None);
        assert_eq!(state.movies.len(), 2);
    }

    #[test]
    fn error_and_movies_are_exclusive() {
        let mut state = AppState::new();
        let seq = state.begin_query("x");
        state.apply_query_result(seq, QueryResult::Failure("boom".to_string()));
        let seq = state.begin_query("y");
        state.apply_query_result(seq, QueryResult::Success(movies(1)));

        let view = state.view_state();
        assert_eq!(view.movies.len(), 1);
        assert_eq!(view.error_message, None);
        assert!(!view.is_loading);
    }
}
