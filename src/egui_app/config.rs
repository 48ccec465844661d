use std::path::PathBuf;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "CLIENT_API_URL";

/// Environment variable pointing at an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "TOPICVOTE_CONFIG";

/// Client configuration wrapper.
///
/// Resolution order: TOML file named by `TOPICVOTE_CONFIG`, then
/// `CLIENT_API_URL`, then the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration using `lookup` for environment values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup(CONFIG_FILE_ENV) {
            Some(path) => AppConfig::from_file(&PathBuf::from(path))?,
            None => AppConfig::default(),
        };

        let mut builder = AppConfigBuilder::from_config(base);
        if let Some(url) = lookup(SERVER_URL_ENV) {
            builder = builder.server_url(url);
        }
        Self::with_builder(builder)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
        })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Path of the local session database
    ///
    /// Defaults to `topicvote/session.db` under the platform data directory.
    pub fn session_db(&self) -> PathBuf {
        if let Some(path) = &self.app.session_db {
            return path.clone();
        }
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("topicvote");
        path.push("session.db");
        path
    }
}
