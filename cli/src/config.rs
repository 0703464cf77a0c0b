use std::fs;
use std::path::PathBuf;

use log::warn;
use rili_core::HttpHolidayTransport;
use serde::Deserialize;

/// User configuration, read from `~/.config/rili/config.toml` when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the holiday endpoint; the year is appended as a path
    /// segment.
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: HttpHolidayTransport::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rili").join("config.toml"))
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing
    /// or unreadable. A malformed file is reported but never fatal.
    pub fn load() -> Config {
        let Some(path) = config_path() else {
            return Config::default();
        };
        let Ok(raw) = fs::read_to_string(&path) else {
            return Config::default();
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring malformed config {}: {err}", path.display());
                Config::default()
            }
        }
    }
}
