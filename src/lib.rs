//! cinefind: debounced movie search with trending search terms.
//!
//! cinefind queries the TMDB catalog as the user types, shows the results,
//! and counts which search terms produce results so the most popular ones
//! can be shown as "trending":
//! - Search input debounced by 500 ms, so fast typing sends one request
//! - Discover (popular movies) when the term is empty, search otherwise
//! - Failures turned into a user-facing message, never an error
//! - Trending counters kept in a local JSON file or an Appwrite collection
//! - Stale responses discarded by query sequence number

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs) / Runtime (runtime.rs)               │  ← Entry point, event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Debounced search terms                           │
//! │  - Event handling, action dispatching               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - View model  │   │ - Endpoints   │   │ - Trending    │
//! │ - Terminal    │   │ - HTTP client │   │   recorder    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//!                                         ┌───────────────┐
//!                                         │ Storage Layer │
//!                                         │ (storage/)    │
//!                                         │ - JSON file   │
//!                                         │ - Appwrite    │
//!                                         └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: TMDB endpoints, transport and result mapping
//! - [`domain`]: Core types (movies, trending entries, errors)
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Rotating log file setup
//! - [`runtime`]: Async loop driving everything
//! - [`storage`]: Trending store backends
//! - [`ui`]: Render sink and terminal rendering
//! - [`worker`]: Background trending worker
//!
//! # Configuration
//!
//! Settings are merged from built-in defaults, a TOML file, then environment
//! variables (a `.env` file is loaded first):
//!
//! ```toml
//! # ~/.config/cinefind/config.toml
//! tmdb_api_key = "eyJhbGciOi..."
//! debounce_ms = 500
//! trending_backend = "json"
//! theme = "dark"
//! trace_level = "debug"
//! ```
//!
//! Every key can be overridden with `CINEFIND_<KEY>`; `TMDB_API_KEY`,
//! `VITE_TMDB_API_KEY` and `VITE_APPWRITE_{PROJECT,DATABASE,COLLECTION}_ID`
//! are accepted as well.
//!
//! # Example
//!
//! ```
//! use cinefind::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (render, actions) = handle_event(&mut state, &Event::Mounted);
//! assert!(render);
//! assert!(matches!(actions[0], Action::FetchMovies { seq: 1, .. }));
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, SearchTermStore, TermSetter};
pub use catalog::{CatalogTransport, HttpCatalog, MovieQueryService};
pub use domain::{CinefindError, MovieSummary, QueryResult, Result, TrendingEntry};
pub use runtime::Runtime;
pub use ui::{RenderProps, RenderSink, TerminalSink, Theme};
pub use worker::TrendingRecorder;

use crate::catalog::DEFAULT_API_BASE_URL;
use crate::storage::{AppwriteConfig, AppwriteTrendingStore, JsonTrendingStore, TrendingStore, DEFAULT_TRENDING_LIMIT};
use crate::worker::DEFAULT_IMAGE_BASE_URL;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Default Appwrite API endpoint.
pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Configuration keys, as used in the TOML file. Environment variables are
/// the upper-cased key prefixed with `CINEFIND_`.
pub const CONFIG_KEYS: &[&str] = &[
    "tmdb_api_key",
    "api_base_url",
    "image_base_url",
    "debounce_ms",
    "trending_limit",
    "trending_backend",
    "trending_file",
    "appwrite_endpoint",
    "appwrite_project_id",
    "appwrite_database_id",
    "appwrite_collection_id",
    "appwrite_api_key",
    "theme",
    "trace_level",
    "log_file",
];

/// Environment names accepted in addition to `CINEFIND_<KEY>`, which wins
/// when both are set.
const ENV_ALIASES: &[(&str, &str)] = &[
    ("VITE_TMDB_API_KEY", "tmdb_api_key"),
    ("TMDB_API_KEY", "tmdb_api_key"),
    ("VITE_APPWRITE_PROJECT_ID", "appwrite_project_id"),
    ("VITE_APPWRITE_DATABASE_ID", "appwrite_database_id"),
    ("VITE_APPWRITE_COLLECTION_ID", "appwrite_collection_id"),
];

/// Where trending counters are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingBackend {
    /// Local JSON document file.
    #[default]
    Json,
    /// Appwrite Databases collection.
    Appwrite,
}

impl std::str::FromStr for TrendingBackend {
    type Err = CinefindError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "appwrite" => Ok(Self::Appwrite),
            other => Err(CinefindError::Config(format!("unknown trending backend: {other}"))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB API read access token, sent as a bearer token.
    pub tmdb_api_key: Option<String>,

    /// Catalog API base URL. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// Base URL prepended to poster paths. Default: `https://image.tmdb.org/t/p/w500`
    pub image_base_url: String,

    /// Debounce delay in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Number of trending entries shown. Default: 5
    pub trending_limit: usize,

    pub trending_backend: TrendingBackend,

    /// JSON store location. Default: `<data dir>/trending.json`
    pub trending_file: Option<String>,

    pub appwrite_endpoint: String,
    pub appwrite_project_id: Option<String>,
    pub appwrite_database_id: Option<String>,
    pub appwrite_collection_id: Option<String>,
    pub appwrite_api_key: Option<String>,

    /// Built-in theme name: `dark`, `light` or `plain`.
    pub theme_name: Option<String>,

    /// Tracing filter when `RUST_LOG` is unset. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file location. Default: `<data dir>/cinefind.log`
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            trending_backend: TrendingBackend::Json,
            trending_file: None,
            appwrite_endpoint: DEFAULT_APPWRITE_ENDPOINT.to_string(),
            appwrite_project_id: None,
            appwrite_database_id: None,
            appwrite_collection_id: None,
            appwrite_api_key: None,
            theme_name: None,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Builds a configuration from a flat key/value map.
    ///
    /// Unknown keys are ignored, blank values count as unset, and numbers or
    /// backend names that fail to parse fall back to their defaults.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use cinefind::{Config, TrendingBackend};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("trending_backend".to_string(), "appwrite".to_string());
    /// map.insert("trending_limit".to_string(), "many".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert_eq!(config.trending_backend, TrendingBackend::Appwrite);
    /// assert_eq!(config.trending_limit, 5);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from);
        let defaults = Self::default();

        let trending_backend = get("trending_backend").map_or(defaults.trending_backend, |value| {
            value.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to json trending backend");
                TrendingBackend::Json
            })
        });

        Self {
            tmdb_api_key: get("tmdb_api_key"),
            api_base_url: get("api_base_url").unwrap_or(defaults.api_base_url),
            image_base_url: get("image_base_url").unwrap_or(defaults.image_base_url),
            debounce_ms: get("debounce_ms")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.debounce_ms),
            trending_limit: get("trending_limit")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.trending_limit),
            trending_backend,
            trending_file: get("trending_file"),
            appwrite_endpoint: get("appwrite_endpoint").unwrap_or(defaults.appwrite_endpoint),
            appwrite_project_id: get("appwrite_project_id"),
            appwrite_database_id: get("appwrite_database_id"),
            appwrite_collection_id: get("appwrite_collection_id"),
            appwrite_api_key: get("appwrite_api_key"),
            theme_name: get("theme"),
            trace_level: get("trace_level"),
            log_file: get("log_file"),
        }
    }

    /// Merges a TOML document and environment variables, in that order, over
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Config`] if `toml_source` is not valid TOML.
    pub fn from_sources<I>(toml_source: Option<&str>, env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = BTreeMap::new();

        if let Some(source) = toml_source {
            let table: toml::Table = toml::from_str(source)
                .map_err(|e| CinefindError::Config(format!("invalid TOML configuration: {e}")))?;

            for (key, value) in table {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, value);
            }
        }

        let env: BTreeMap<String, String> = env.into_iter().collect();
        for &(alias, key) in ENV_ALIASES {
            if let Some(value) = env.get(alias) {
                map.insert(key.to_string(), value.clone());
            }
        }
        for key in CONFIG_KEYS {
            if let Some(value) = env.get(&format!("CINEFIND_{}", key.to_ascii_uppercase())) {
                map.insert((*key).to_string(), value.clone());
            }
        }

        Ok(Self::from_map(&map))
    }

    /// Loads configuration from `path` (or the default config file, if it
    /// exists) and the process environment, after loading `.env`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read, or if the
    /// file is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = ?env_file, "loaded .env file");
        }

        let source = match path {
            Some(path) => Some(std::fs::read_to_string(path)?),
            None => infrastructure::default_config_file()
                .filter(|p| p.exists())
                .map(std::fs::read_to_string)
                .transpose()?,
        };

        Self::from_sources(source.as_deref(), std::env::vars())
    }

    /// The TMDB token.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Config`] if no token is configured.
    pub fn api_token(&self) -> Result<&str> {
        self.tmdb_api_key
            .as_deref()
            .ok_or_else(|| CinefindError::Config("missing TMDB API token (set TMDB_API_KEY)".to_string()))
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Appwrite connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Config`] if a project, database or collection
    /// id is missing.
    pub fn appwrite(&self) -> Result<AppwriteConfig> {
        let require = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| CinefindError::Config(format!("appwrite backend requires {name}")))
        };

        Ok(AppwriteConfig {
            endpoint: self.appwrite_endpoint.clone(),
            project_id: require(&self.appwrite_project_id, "appwrite_project_id")?,
            database_id: require(&self.appwrite_database_id, "appwrite_database_id")?,
            collection_id: require(&self.appwrite_collection_id, "appwrite_collection_id")?,
            api_key: self.appwrite_api_key.clone(),
        })
    }

    /// The configured theme, falling back to the default for unknown names.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the catalog query service from configuration.
///
/// # Errors
///
/// Returns [`CinefindError::Config`] if the TMDB token is missing.
pub fn build_query_service(config: &Config) -> Result<MovieQueryService> {
    let transport = HttpCatalog::new(config.api_token()?);
    Ok(MovieQueryService::with_base_url(Arc::new(transport), config.api_base_url.clone()))
}

/// Opens the configured trending store.
///
/// # Errors
///
/// Returns an error if the JSON store cannot be opened or the Appwrite
/// settings are incomplete.
pub fn build_trending_store(config: &Config) -> Result<Arc<dyn TrendingStore>> {
    match config.trending_backend {
        TrendingBackend::Json => {
            let path = infrastructure::trending_file(config.trending_file.as_deref());
            tracing::debug!(path = ?path, "using JSON trending store");
            Ok(Arc::new(JsonTrendingStore::new(path)?))
        }
        TrendingBackend::Appwrite => {
            let appwrite = config.appwrite()?;
            tracing::debug!(endpoint = %appwrite.endpoint, "using Appwrite trending store");
            Ok(Arc::new(AppwriteTrendingStore::new(appwrite)))
        }
    }
}

/// Creates the trending recorder for `store` with the configured poster base
/// and limit.
#[must_use]
pub fn build_recorder(config: &Config, store: Arc<dyn TrendingStore>) -> TrendingRecorder {
    TrendingRecorder::new(store)
        .with_image_base_url(config.image_base_url.clone())
        .with_limit(config.trending_limit)
}
