use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use previewer_core::DEFAULT_PAGE_LIMIT;
use previewer_engine::{ApiSettings, DEFAULT_API_BASE};
use serde::Deserialize;
use thiserror::Error;

use super::logging::{LogDestination, LogLevel};

const CONFIG_FILENAME: &str = "previewer.ron";
const LOG_FILENAME: &str = "previewer.log";
const CONFIG_PATH_ENV: &str = "PREVIEWER_CONFIG";
const API_BASE_ENV: &str = "PREVIEWER_API_BASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_limit: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_response_bytes: api.max_bytes,
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
            log_file: PathBuf::from(LOG_FILENAME),
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..ApiSettings::default()
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.page_limit == 0 {
            return Err(ConfigError::Invalid("page_limit must be at least 1".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".into()));
        }
        Ok(self)
    }
}

/// Loads configuration from `$PREVIEWER_CONFIG` or `./previewer.ron`, then
/// applies `$PREVIEWER_API_BASE` on top.
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = load_from(&path)?;
    with_overrides(config, std::env::var(API_BASE_ENV).ok())
}

/// A missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()
}

fn with_overrides(
    mut config: AppConfig,
    api_base: Option<String>,
) -> Result<AppConfig, ConfigError> {
    if let Some(base) = api_base.filter(|base| !base.trim().is_empty()) {
        config.api_base_url = base;
    }
    config.validate()
}
