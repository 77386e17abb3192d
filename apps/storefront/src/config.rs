//! # Application Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`<config_dir>/storefront.toml`)
//! 3. Environment variables (`STOREFRONT_*`)
//!
//! ## Example `storefront.toml`
//! ```toml
//! api_url = "https://shop.example.com/api/v1"
//! api_timeout_secs = 15
//! data_dir = "/var/lib/storefront"
//! search_debounce_ms = 500
//! validation_debounce_ms = 600
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use storefront_api::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use storefront_forms::{DEFAULT_DEBOUNCE, DEFAULT_VALIDATION_DEBOUNCE};
use storefront_storage::default_data_dir;

use crate::error::AppError;

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::internal(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Storefront client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL including the API prefix.
    pub api_url: String,

    /// Whole-request timeout.
    pub api_timeout_secs: u64,

    /// Where the token, user and cart are kept.
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Quiet window before a search query is sent.
    pub search_debounce_ms: u64,

    /// Quiet window before an async field validator runs.
    pub validation_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: DEFAULT_BASE_URL.to_string(),
            api_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            data_dir: None,
            search_debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            validation_debounce_ms: DEFAULT_VALIDATION_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// `config_path` overrides the platform config location.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config; using defaults");
            Self::default()
        })
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api_url
            )));
        }

        if self.api_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides. `lookup` is `std::env::var` outside
    /// of tests.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api_url = url;
        }

        if let Some(secs) = lookup("STOREFRONT_API_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.api_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric STOREFRONT_API_TIMEOUT_SECS"),
            }
        }

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(ms) = lookup("STOREFRONT_SEARCH_DEBOUNCE_MS") {
            match ms.parse() {
                Ok(ms) => self.search_debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric STOREFRONT_SEARCH_DEBOUNCE_MS"),
            }
        }

        if let Some(ms) = lookup("STOREFRONT_VALIDATION_DEBOUNCE_MS") {
            match ms.parse() {
                Ok(ms) => self.validation_debounce_ms = ms,
                Err(_) => {
                    warn!(value = %ms, "Ignoring non-numeric STOREFRONT_VALIDATION_DEBOUNCE_MS")
                }
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Client settings for [`storefront_api::ApiClient`].
    pub fn api_config(&self) -> Result<ApiConfig, AppError> {
        Ok(ApiConfig::new(&self.api_url)?.timeout(Duration::from_secs(self.api_timeout_secs)))
    }

    /// Configured data directory, or the platform default.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, AppError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(default_data_dir()?),
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn validation_debounce(&self) -> Duration {
        Duration::from_millis(self.validation_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080/api/v1");
        assert_eq!(config.api_timeout_secs, 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.validation_debounce(), Duration::from_millis(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_values_then_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            "api_url = \"https://shop.example.com/api/v1\"\napi_timeout_secs = 3\n",
        )
        .unwrap();

        let mut config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.api_url, "https://shop.example.com/api/v1");
        assert_eq!(config.api_timeout_secs, 3);
        // Unset keys keep their defaults
        assert_eq!(config.search_debounce_ms, 500);

        let env: HashMap<&str, &str> = [
            ("STOREFRONT_API_TIMEOUT_SECS", "20"),
            ("STOREFRONT_DATA_DIR", "/tmp/shop"),
            ("STOREFRONT_SEARCH_DEBOUNCE_MS", "abc"),
        ]
        .into_iter()
        .collect();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "https://shop.example.com/api/v1");
        assert_eq!(config.api_timeout_secs, 20);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/shop")));
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig {
            api_url: "ftp://shop".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config.api_url = "https://shop".to_string();
        config.api_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.api_timeout_secs, 10);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "api_timeout_secs = \"soon\"").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
