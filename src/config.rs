//! # Configuration
//!
//! Load order, later sources overriding earlier ones:
//!
//! 1. Defaults
//! 2. TOML file (explicit path, else `shopfront.toml` in the platform config dir)
//! 3. Environment variables (`SHOPFRONT_API_URL`, `SHOPFRONT_WS_URL`,
//!    `SHOPFRONT_STORAGE_DIR`, `SHOPFRONT_PAGE_SIZE`, `SHOPFRONT_CONFLICT_POLICY`)
//!
//! ```toml
//! [api]
//! base_url = "https://shop.example.com/api"
//! request_timeout_secs = 20
//!
//! [notifications]
//! url = "wss://shop.example.com/notifications"
//! capacity = 50
//!
//! [stores]
//! buffer_size = 32
//! conflict_policy = "latest_issued"
//!
//! [catalog]
//! page_size = 12
//! ```

use resource_store::ConflictPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// WebSocket endpoint. The listener is not started when unset.
    #[serde(default)]
    pub url: Option<String>,

    /// How many notifications the feed keeps.
    #[serde(default = "default_feed_capacity")]
    pub capacity: usize,
}

fn default_feed_capacity() -> usize {
    50
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            url: None,
            capacity: default_feed_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted records; the platform data dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Capacity of each store actor's mailbox.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

fn default_buffer_size() -> usize {
    32
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Items per page in paginated and infinite-scroll lists.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    12
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub stores: StoreSettings,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with a custom environment lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(env);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API base URL must start with http:// or https://, got: {}",
                base
            )));
        }

        if let Some(url) = &self.notifications.url {
            if !url.starts_with("ws://") && !url.starts_with("wss://") {
                return Err(ConfigError::Invalid(format!(
                    "Notification URL must start with ws:// or wss://, got: {}",
                    url
                )));
            }
        }

        if self.catalog.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be greater than 0".into()));
        }
        if self.stores.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be greater than 0".into()));
        }
        if self.notifications.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be greater than 0".into()));
        }
        Ok(())
    }

    /// Where persisted records live.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "shopfront", "shopfront")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from(".shopfront"))
    }

    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("SHOPFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(url) = env("SHOPFRONT_WS_URL") {
            debug!(url = %url, "Overriding notification URL from environment");
            self.notifications.url = Some(url);
        }

        if let Some(dir) = env("SHOPFRONT_STORAGE_DIR") {
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(size) = env("SHOPFRONT_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(size) => self.catalog.page_size = size,
                Err(_) => warn!(value = %size, "Ignoring invalid SHOPFRONT_PAGE_SIZE"),
            }
        }

        if let Some(policy) = env("SHOPFRONT_CONFLICT_POLICY") {
            match policy.parse::<ConflictPolicy>() {
                Ok(parsed) => {
                    debug!(policy = %parsed, "Overriding conflict policy from environment");
                    self.stores.conflict_policy = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring invalid SHOPFRONT_CONFLICT_POLICY"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join("shopfront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.stores.buffer_size, 32);
        assert_eq!(config.stores.conflict_policy, ConflictPolicy::LastWriteWins);
        assert_eq!(config.api.request_timeout_secs, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopfront.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://shop.example.com/api"
request_timeout_secs = 20

[catalog]
page_size = 24
"#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("SHOPFRONT_PAGE_SIZE", "6"),
            ("SHOPFRONT_CONFLICT_POLICY", "latest-issued"),
            ("SHOPFRONT_WS_URL", "wss://shop.example.com/ws"),
        ]
        .into_iter()
        .collect();
        let config =
            AppConfig::load_with(Some(path), |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.request_timeout_secs, Some(20));
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(config.stores.conflict_policy, ConflictPolicy::LatestIssued);
        assert_eq!(
            config.notifications.url.as_deref(),
            Some("wss://shop.example.com/ws")
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with(Some(dir.path().join("absent.toml")), no_env).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_with(Some(dir.path().join("absent.toml")), |key| {
            (key == "SHOPFRONT_API_URL").then(|| "ftp://shop".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.catalog.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with(Some(dir.path().join("absent.toml")), |key| {
            (key == "SHOPFRONT_STORAGE_DIR").then(|| "/tmp/shopfront-state".to_string())
        })
        .unwrap();
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/shopfront-state"));
    }
}
