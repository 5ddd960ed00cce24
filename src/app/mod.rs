//! Application layer coordinating state, events, and actions.
//!
//! Sits between the runtime (which owns the channels and tasks) and the
//! domain, catalog and worker layers.
//!
//! ```text
//! keystrokes → SearchTermStore → Events → handle_event → AppState → render
//!                                              ↓
//!                                           Actions → catalog query / trending worker
//!                                              ↑                ↓
//!                                              └──── results ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Live and settled search terms
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Query cycle phase
//! - [`state`]: Central application state container

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::{SearchTermStore, TermSetter, DEFAULT_DEBOUNCE};
pub use handler::{handle_event, Event};
pub use modes::QueryPhase;
pub use state::{AppState, ViewState};
