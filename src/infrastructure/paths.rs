//! Filesystem locations for cinefind data, logs and configuration.
//!
//! Platform directories come from the `dirs` crate. On Linux the data
//! directory resolves to `~/.local/share/cinefind`.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "cinefind";

/// File name of the local trending store.
pub const TRENDING_FILE_NAME: &str = "trending.json";

/// File name of the rotating log.
pub const LOG_FILE_NAME: &str = "cinefind.log";

/// Returns the data directory for cinefind storage and logs.
///
/// Falls back to `./.cinefind` when the platform has no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".cinefind"), |dir| dir.join(APP_DIR))
}

/// Default location of the TOML configuration file, if the platform has a
/// configuration directory.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Path of the trending store: `configured` when given, else the data directory.
#[must_use]
pub fn trending_file(configured: Option<&str>) -> PathBuf {
    configured.map_or_else(|| get_data_dir().join(TRENDING_FILE_NAME), expand_tilde)
}

/// Path of the log file: `configured` when given, else the data directory.
#[must_use]
pub fn log_file(configured: Option<&str>) -> PathBuf {
    configured.map_or_else(|| get_data_dir().join(LOG_FILE_NAME), expand_tilde)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or on systems without a home directory, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    expand_tilde_with(path, home.as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_against_home() {
        let home = Path::new("/home/ana");
        assert_eq!(expand_tilde_with("~/movies/t.json", Some(home)), PathBuf::from("/home/ana/movies/t.json"));
        assert_eq!(expand_tilde_with("~", Some(home)), PathBuf::from("/home/ana"));
        assert_eq!(expand_tilde_with("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde_with("/abs/path", Some(home)), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn configured_paths_win() {
        assert_eq!(trending_file(Some("/tmp/t.json")), PathBuf::from("/tmp/t.json"));
        assert!(log_file(None).ends_with(LOG_FILE_NAME));
        assert!(trending_file(None).ends_with(TRENDING_FILE_NAME));
    }
}
