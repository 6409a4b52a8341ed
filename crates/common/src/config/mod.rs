//! Configuration management for Newsdesk clients
//!
//! Supports loading configuration from:
//! - A `.env` file (via dotenvy)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Environment variables (prefixed with APP__)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Query cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Path of the image upload endpoint
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Bearer token sent with every request
    pub auth_token: Option<String>,

    /// Cursor used by the dashboards when listing everything
    #[serde(default = "default_list_cursor")]
    pub list_cursor: u64,

    /// Limit used by the dashboards when listing everything
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,

    /// Number of top approved articles fetched for the featured slot
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Age in seconds after which a cached query is reloaded
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// Service name attached to log output
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Matches the largest integer a JSON number can carry without loss.
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

// Default value functions
fn default_base_url() -> String { "http://localhost:8080/api".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_upload_path() -> String { "/upload/image".to_string() }
fn default_list_cursor() -> u64 { MAX_SAFE_INTEGER }
fn default_list_limit() -> u64 { MAX_SAFE_INTEGER }
fn default_featured_limit() -> u32 { 5 }
fn default_stale_secs() -> u64 { 300 }
fn default_log_level() -> String { "info".to_string() }
fn default_service_name() -> String { "newsdesk".to_string() }

impl AppConfig {
    /// Load configuration from `.env`, config files and the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__API__BASE_URL=https://cms.example.com/api
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific file (format inferred from the extension)
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Get cache staleness window as Duration
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.cache.stale_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            upload_path: default_upload_path(),
            auth_token: None,
            list_cursor: default_list_cursor(),
            list_limit: default_list_limit(),
            featured_limit: default_featured_limit(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
