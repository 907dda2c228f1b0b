//! Plugin configuration.
//!
//! Loaded from `~/.config/vetro/config.toml`. The library has no UI of
//! its own, so the file only tunes ambient behavior (today: logging).
//! Missing files and missing sections fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for Vetro.
///
/// Missing sections fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// File logging settings.
    pub log: LogConfig,
}

impl PluginConfig {
    /// Clamps values to safe ranges.
    ///
    /// `max_file_mb` keeps its `0 = no rotation` meaning; only an upper
    /// bound is enforced.
    pub fn validate(&mut self) {
        self.log.max_file_mb = self.log.max_file_mb.min(1024);
    }
}

/// Returns the config directory: `~/.config/vetro/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("vetro"))
}

/// Returns the config file path: `~/.config/vetro/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse the config file at `path`.
///
/// Returns `Ok(PluginConfig)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn load_from(path: &Path) -> Result<PluginConfig, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut config: PluginConfig =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors go to
/// stderr, since the logger is not up yet when this runs.
pub fn load() -> PluginConfig {
    let Some(path) = config_path() else {
        return PluginConfig::default();
    };
    match load_from(&path) {
        Ok(config) => config,
        Err(e) if is_file_not_found(&e) => PluginConfig::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            PluginConfig::default()
        }
    }
}

/// Returns true if the error message indicates a missing file.
fn is_file_not_found(e: &str) -> bool {
    e.contains("cannot find the path")
        || e.contains("The system cannot find")
        || e.contains("No such file or directory")
}
