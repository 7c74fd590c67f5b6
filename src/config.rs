use crate::model::page::PAGE_SIZE_OPTIONS;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `api_base_url`
pub const API_URL_ENV: &str = "FLEXIA_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// Initial rows per page; values outside the page-size options fall back to 10
    pub default_page_size: usize,
    pub request_timeout_secs: u64,
    /// Filter directive used when `RUST_LOG` is not set
    pub log_level: String,
    /// Prefills the login form
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            default_page_size: 10,
            request_timeout_secs: 15,
            log_level: "info".to_string(),
            last_email: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".flexia-admin"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("flexia-admin.log"))
    }

    /// Load the user config, writing the defaults on first run.
    /// The environment override is applied on top.
    pub fn load() -> anyhow::Result<Config> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config = match Self::load_from(&path)? {
            Some(config) => config,
            None => {
                let config = Config::default();
                config.save_to(&path)?;
                config
            }
        };

        Ok(config.with_api_url_override(env::var(API_URL_ENV).ok()))
    }

    /// Read a config file; `None` if it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    pub fn page_size(&self) -> usize {
        if PAGE_SIZE_OPTIONS.contains(&self.default_page_size) {
            self.default_page_size
        } else {
            PAGE_SIZE_OPTIONS[0]
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
