//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber with a rotating log file.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `"info"`. Logs go to `config.log_file` or
/// `<data dir>/cinefind.log`.
///
/// Returns the log file path, or `None` if the log directory cannot be
/// created. Observability is optional, so failures never abort startup.
/// Only the first call installs a subscriber.
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let log_path = paths::log_file(config.log_file.as_deref());
    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return None;
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let writer = FileWriter::new(log_path.clone());
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || writer.clone());

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);

    let _ = subscriber.try_init();
    Some(log_path)
}
