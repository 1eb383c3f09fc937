use std::path::Path;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Client configuration wrapper.
///
/// Holds no credentials; the bearer token lives in the persisted store and
/// is read from there per request.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the config file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            app: AppConfig::load()?,
        })
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API path
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url(), path)
        } else {
            format!("{}/{}", self.server_url(), path)
        }
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn storage_path(&self) -> &Path {
        &self.app.storage_path
    }

    pub fn log_filter(&self) -> &str {
        &self.app.log_filter
    }
}
