//! Runtime configuration: CLI/env values layered over an optional TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

const APP_DIR: &str = "xweather";
pub const DEFAULT_MIN_DELAY_MS: u64 = 500;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no OpenWeatherMap API key configured")]
    MissingApiKey,
}

/// On-disk config file. Every field is optional.
///
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org"
/// min_delay_ms = 500
/// log_file = "/tmp/xweather.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub min_delay_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Load from `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub min_delay_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings the app runs with
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub api_key: String,
    pub base_url: String,
    pub min_delay: Duration,
    pub log_file: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Overrides win over the file; the file wins over defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = overrides
            .api_key
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = overrides
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let min_delay_ms = overrides
            .min_delay_ms
            .or(file.min_delay_ms)
            .unwrap_or(DEFAULT_MIN_DELAY_MS);

        let log_file = overrides
            .log_file
            .or(file.log_file)
            .or_else(default_log_path);

        Ok(Self {
            api_key,
            base_url,
            min_delay: Duration::from_millis(min_delay_ms),
            log_file,
        })
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs_next::data_local_dir().map(|dir| dir.join(APP_DIR).join("xweather.log"))
}
