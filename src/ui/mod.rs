//! Rendering layer.
//!
//! The runtime hands a [`RenderProps`] snapshot to a [`RenderSink`] whenever
//! the view changes. The terminal sink turns the props into a [`UIViewModel`]
//! and draws it with the components in [`components`].
//!
//! ```text
//! AppState → RenderProps → RenderSink::render → UIViewModel → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view of the props
//! - [`renderer`]: [`TerminalSink`], the terminal render sink
//! - [`components`]: Section renderers (header, search, trending, movies)
//! - [`helpers`]: Text layout and highlighting utilities
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::TerminalSink;
pub use theme::Theme;
pub use viewmodel::{DisplayItem, ListBody, TrendingItem, UIViewModel};

use crate::app::TermSetter;
use crate::domain::error::Result;
use crate::domain::{MovieSummary, TrendingEntry};

/// Everything a render sink needs to draw the search screen.
#[derive(Debug, Clone)]
pub struct RenderProps {
    /// Live search term, as typed.
    pub search_term: String,
    /// Handle for changing the live search term.
    pub set_search_term: TermSetter,
    pub movies: Vec<MovieSummary>,
    pub trending_movies: Vec<TrendingEntry>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Receives a fresh [`RenderProps`] every time the view changes.
pub trait RenderSink: Send {
    /// Draws the view.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written. The runtime logs it
    /// and keeps going.
    fn render(&mut self, props: &RenderProps) -> Result<()>;
}
