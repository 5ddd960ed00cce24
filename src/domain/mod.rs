//! Domain layer for cinefind.
//!
//! Core types shared by every other layer, independent of HTTP clients,
//! storage backends, and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Catalog movie summaries and query results
//! - [`trending`]: Trending search counters

pub mod error;
pub mod movie;
pub mod trending;

pub use error::{CinefindError, QueryError, Result, GENERIC_QUERY_ERROR};
pub use movie::{MovieSummary, QueryResult};
pub use trending::{poster_url_for, TrendingEntry, PLACEHOLDER_POSTER};
