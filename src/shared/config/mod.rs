//! Application configuration module
//!
//! Provides configuration types for the storefront client. Values come from
//! built-in defaults, an optional TOML file and environment variables, in
//! that order of precedence.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Backend origin every API path is appended to
pub const DEFAULT_SERVER_URL: &str = "https://marketsquare-backend-6yy4.onrender.com/api";

/// Default tracing filter for the desktop binary
pub const DEFAULT_LOG_FILTER: &str = "marketsquare=info";

/// Environment variable overriding the backend URL
pub const ENV_API_URL: &str = "MARKETSQUARE_API_URL";

/// Environment variable overriding the session database path
pub const ENV_DB_PATH: &str = "MARKETSQUARE_DB_PATH";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash
    pub server_url: String,
    /// Location of the persisted session database
    pub storage_path: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            storage_path: default_storage_path(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = match default_config_file() {
            Some(path) if path.exists() => AppConfigBuilder::from_file(&path)?,
            _ => AppConfigBuilder::default(),
        };
        builder = builder.with_env();
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.server_url)?;
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("storage_path"));
        }
        Ok(())
    }
}

/// On-disk shape of `config.toml`
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    storage_path: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    storage_path: Option<PathBuf>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Start from the values found in a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Start from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            server_url: file.server_url,
            storage_path: file.storage_path,
            log_filter: file.log_filter,
        })
    }

    /// Apply `MARKETSQUARE_API_URL` and `MARKETSQUARE_DB_PATH` when set
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.server_url = Some(url);
        }
        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            self.storage_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the session database path
    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Set the default log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let server_url = match self.server_url {
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => DEFAULT_SERVER_URL.to_string(),
        };
        let config = AppConfig {
            server_url,
            storage_path: self.storage_path.unwrap_or_else(default_storage_path),
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::MissingValue("server_url"));
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidUrl(url.to_string()))?;
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }
    Ok(())
}

fn default_storage_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    path.push("marketsquare");
    path.push("session.db");
    path
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("marketsquare");
        path.push("config.toml");
        path
    })
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("could not read {path:?}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("invalid config file: {0}")]
    Parse(String),
}
