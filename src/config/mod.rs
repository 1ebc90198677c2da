//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::fetch::{LoaderConfig, RetryPolicy, DEFAULT_SOURCE};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Snapshot loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// URL or file path of the tournament data
    #[serde(default = "default_source")]
    pub source: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_user_agent() -> String {
    format!("tournament-table/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            user_agent: default_user_agent(),
        }
    }
}

/// Host page configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSettings {
    /// HTML template providing the surfaces; the built-in page when unset
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Directory served for every path other than the page and the API
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./public")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            static_dir: default_static_dir(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub loader: LoaderSettings,

    #[serde(default)]
    pub page: PageSettings,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            loader: LoaderSettings::default(),
            page: PageSettings::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.source.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Loader source must not be empty".to_string(),
            ));
        }

        if self.loader.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Loader timeout must be greater than 0".to_string(),
            ));
        }

        if !self.loader.backoff_multiplier.is_finite() || self.loader.backoff_multiplier < 1.0 {
            return Err(ConfigError::ValidationError(
                "Backoff multiplier must be at least 1.0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Runtime loader configuration.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            source: self.loader.source.clone(),
            timeout: Duration::from_secs(self.loader.timeout_seconds),
            user_agent: self.loader.user_agent.clone(),
            base_dir: None,
            retry: RetryPolicy {
                max_retries: self.loader.max_retries,
                initial_delay_ms: self.loader.retry_delay_ms,
                backoff_multiplier: self.loader.backoff_multiplier,
            },
        }
    }
}
