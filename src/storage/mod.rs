//! Storage layer for trending search counters.
//!
//! # Modules
//!
//! - `backend`: `TrendingStore` trait abstraction for backend implementations
//! - `json`: local JSON file store
//! - `appwrite`: hosted Appwrite Databases store
//! - `ranking`: trending order (count descending) and top-N selection
//! - `models`: storage record types separate from domain models

pub mod appwrite;
pub mod backend;
pub mod json;
pub mod models;
pub mod ranking;

pub use appwrite::{AppwriteConfig, AppwriteTrendingStore};
pub use backend::TrendingStore;
pub use json::JsonTrendingStore;
pub use models::{NewTrendingRecord, TrendingRecord};
pub use ranking::{sort_by_count, top_n, DEFAULT_TRENDING_LIMIT};
