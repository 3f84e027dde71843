use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::api::DEFAULT_BASE_URL;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Listing endpoint; detail URLs come from the listing itself
    pub base_url: String,

    /// Per-request timeout in seconds, transport default when unset
    pub request_timeout_secs: Option<u64>,

    /// User agent sent with every request
    pub user_agent: String,

    /// Log file used in interactive mode
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            user_agent: format!("pokedex/{}", env!("CARGO_PKG_VERSION")),
            log_file: None,
        }
    }
}

impl Config {
    /// Initialize configuration from defaults, a config file and the environment
    pub async fn init(explicit_path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();

        match explicit_path {
            Some(path) => {
                let file_config = Self::load_from_path(path).await?;
                config.merge_with(file_config);
            }
            None => {
                if let Some(file_config) = Self::load_from_file().await? {
                    config.merge_with(file_config);
                }
            }
        }

        // Environment wins over files
        config.load_from_env();

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(base_url) = std::env::var("POKEDEX_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(timeout_str) = std::env::var("POKEDEX_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse() {
                self.request_timeout_secs = Some(timeout);
            }
        }

        if let Ok(user_agent) = std::env::var("POKEDEX_USER_AGENT") {
            self.user_agent = user_agent;
        }

        if let Ok(log_file) = std::env::var("POKEDEX_LOG_FILE") {
            self.log_file = Some(PathBuf::from(log_file));
        }
    }

    /// Candidate config files, highest priority first
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.pokedex.json"),
            PathBuf::from("./pokedex.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pokedex").join("pokedex.json"));
        }

        paths
    }

    /// Load the first config file that exists, if any
    pub async fn load_from_file() -> Result<Option<Self>> {
        for path in Self::config_paths() {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific JSON file
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Merge another configuration into this one
    pub fn merge_with(&mut self, other: Self) {
        let defaults = Self::default();

        if other.base_url != defaults.base_url {
            self.base_url = other.base_url;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.user_agent != defaults.user_agent {
            self.user_agent = other.user_agent;
        }
        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }
    }

    /// Where interactive mode writes its log
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("pokedex")
                .join("pokedex.log")
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("request_timeout_secs must be greater than 0"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(anyhow::anyhow!("user_agent must not be empty"));
        }

        Ok(())
    }
}
