//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It takes one
//! event, mutates state, and returns whether the view needs re-rendering
//! together with the side effects the runtime should perform.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mounted`
//! - **Input**: `TermTyped` (every keystroke), `TermSettled` (debounced)
//! - **Catalog**: `QueryFinished` with the sequence number of its query
//! - **Worker**: `WorkerResponse` from the trending worker

use crate::app::{Action, AppState};
use crate::domain::QueryResult;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events fed to the handler by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The view has been attached. Issues the initial discover query and the
    /// trending load; only the first occurrence has any effect.
    Mounted,

    /// The live search term changed.
    TermTyped(String),

    /// The debounced search term changed.
    TermSettled(String),

    /// A catalog query finished.
    QueryFinished {
        /// Sequence number the query was issued with.
        seq: u64,
        result: QueryResult,
    },

    /// A response from the trending worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns
/// `(should_render, actions)`.
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Mounted => {
            if state.mounted {
                tracing::debug!("already mounted");
                return (false, vec![]);
            }
            state.mounted = true;

            let term = state.settled_term.clone();
            let seq = state.begin_query(&term);
            (
                true,
                vec![
                    Action::FetchMovies { seq, term },
                    Action::PostToWorker(WorkerMessage::load_trending()),
                ],
            )
        }
        Event::TermTyped(term) => {
            if &state.search_term == term {
                return (false, vec![]);
            }
            state.search_term.clone_from(term);
            (true, vec![])
        }
        Event::TermSettled(term) => {
            if &state.settled_term == term {
                tracing::debug!(term = %term, "settled term unchanged, skipping query");
                return (false, vec![]);
            }
            state.settled_term.clone_from(term);

            if !state.mounted {
                return (false, vec![]);
            }

            let seq = state.begin_query(term);
            tracing::debug!(seq = seq, term = %term, "starting query cycle");
            (true, vec![Action::FetchMovies { seq, term: term.clone() }])
        }
        Event::QueryFinished { seq, result } => {
            let Some(term) = state.apply_query_result(*seq, result.clone()) else {
                return (false, vec![]);
            };

            let mut actions = vec![];
            if !term.is_empty() {
                if let Some(first) = state.movies.first() {
                    actions.push(Action::PostToWorker(WorkerMessage::record_search(term, first.clone())));
                }
            }
            (true, actions)
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::TrendingLoaded { entries } => {
                let changed = state.set_trending(entries);
                if !changed {
                    tracing::debug!("trending unchanged, skipping render");
                }
                (changed, vec![])
            }
            WorkerResponse::SearchRecorded { search_term, count } => {
                tracing::debug!(search_term = %search_term, count = count, "search recorded");
                (false, vec![])
            }
            WorkerResponse::Error { message } => {
                tracing::warn!(message = %message, "trending worker reported an error");
                (false, vec![])
            }
        },
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mounted => "mounted",
        Event::TermTyped(_) => "term_typed",
        Event::TermSettled(_) => "term_settled",
        Event::QueryFinished { .. } => "query_finished",
        Event::WorkerResponse(_) => "worker_response",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieSummary, TrendingEntry, GENERIC_QUERY_ERROR};

    fn mounted() -> (AppState, u64) {
        let mut state = AppState::new();
        let (_, actions) = handle_event(&mut state, &Event::Mounted);
        let seq = match &actions[0] {
            Action::FetchMovies { seq, .. } => *seq,
            other => panic!("unexpected action: {other:?}"),
        };
        (state, seq)
    }

    fn finished(seq: u64, result: QueryResult) -> Event {
        Event::QueryFinished { seq, result }
    }

    #[test]
    fn mount_issues_discover_query_and_trending_load_once() {
        let mut state = AppState::new();
        let (render, actions) = handle_event(&mut state, &Event::Mounted);

        assert!(render);
        assert!(state.is_loading());
        assert_eq!(
            actions,
            vec![
                Action::FetchMovies { seq: 1, term: String::new() },
                Action::PostToWorker(WorkerMessage::LoadTrending),
            ]
        );

        assert_eq!(handle_event(&mut state, &Event::Mounted), (false, vec![]));
    }

    #[test]
    fn discover_results_are_not_recorded() {
        let (mut state, seq) = mounted();
        let (render, actions) = handle_event(&mut state, &finished(seq, QueryResult::Success(vec![MovieSummary::new(1, "Popular")])));

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.movies.len(), 1);
    }

    #[test]
    fn settled_term_fetches_and_records_first_result() {
        let (mut state, seq) = mounted();
        handle_event(&mut state, &finished(seq, QueryResult::Success(vec![])));

        let (_, actions) = handle_event(&mut state, &Event::TermSettled("batman".to_string()));
        assert_eq!(actions, vec![Action::FetchMovies { seq: 2, term: "batman".to_string() }]);

        let results = vec![MovieSummary::new(268, "Batman"), MovieSummary::new(364, "Batman Returns")];
        let (render, actions) = handle_event(&mut state, &finished(2, QueryResult::Success(results)));

        assert!(render);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::record_search("batman", MovieSummary::new(268, "Batman")))]
        );
        assert!(!state.is_loading());
    }

    #[test]
    fn empty_results_and_failures_are_not_recorded() {
        let (mut state, _) = mounted();

        handle_event(&mut state, &Event::TermSettled("zzz".to_string()));
        let (_, actions) = handle_event(&mut state, &finished(2, QueryResult::Success(vec![])));
        assert!(actions.is_empty());
        assert_eq!(state.error_message, None);

        handle_event(&mut state, &Event::TermSettled("err".to_string()));
        let (_, actions) = handle_event(&mut state, &finished(3, QueryResult::Failure(GENERIC_QUERY_ERROR.to_string())));
        assert!(actions.is_empty());
        assert!(state.movies.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(GENERIC_QUERY_ERROR));
    }

    #[test]
    fn repeated_settled_term_is_ignored() {
        let (mut state, _) = mounted();
        assert_eq!(handle_event(&mut state, &Event::TermSettled(String::new())), (false, vec![]));

        handle_event(&mut state, &Event::TermSettled("dune".to_string()));
        assert_eq!(handle_event(&mut state, &Event::TermSettled("dune".to_string())), (false, vec![]));
    }

    #[test]
    fn stale_result_is_dropped_without_render() {
        let (mut state, first) = mounted();
        handle_event(&mut state, &Event::TermSettled("heat".to_string()));

        let (render, actions) = handle_event(&mut state, &finished(first, QueryResult::Success(vec![MovieSummary::new(1, "Old")])));
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.movies.is_empty());
        assert!(state.is_loading());
    }

    #[test]
    fn typing_only_renders() {
        let (mut state, _) = mounted();
        assert_eq!(handle_event(&mut state, &Event::TermTyped("b".to_string())), (true, vec![]));
        assert_eq!(handle_event(&mut state, &Event::TermTyped("b".to_string())), (false, vec![]));
        assert_eq!(state.search_term, "b");
        assert_eq!(state.settled_term, "");
    }

    #[test]
    fn trending_load_updates_state_and_errors_are_swallowed() {
        let (mut state, _) = mounted();
        let entries = vec![TrendingEntry {
            id: "1".to_string(),
            search_term: "batman".to_string(),
            count: 3,
            poster_url: "/no-movie.png".to_string(),
            movie_id: 268,
        }];

        let loaded = Event::WorkerResponse(WorkerResponse::TrendingLoaded { entries: entries.clone() });
        assert_eq!(handle_event(&mut state, &loaded), (true, vec![]));
        assert_eq!(handle_event(&mut state, &loaded), (false, vec![]));
        assert_eq!(state.trending_movies, entries);

        let error = Event::WorkerResponse(WorkerResponse::Error { message: "load trending: offline".to_string() });
        assert_eq!(handle_event(&mut state, &error), (false, vec![]));
        assert!(state.is_loading());
        assert_eq!(state.error_message, None);
    }
}
