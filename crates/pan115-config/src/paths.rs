//! Well-known locations.

use std::path::PathBuf;

/// Application name used for the config directory.
const APP_NAME: &str = "pan115";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PAN115_CONFIG_DIR";

/// Get the config directory for pan115.
///
/// Checks `PAN115_CONFIG_DIR` first, then falls back to the platform default.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Directory for rolling log files.
pub fn log_dir() -> PathBuf {
    config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Expand `~/` to the home directory.
pub(crate) fn expand_path(path: &std::path::Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
