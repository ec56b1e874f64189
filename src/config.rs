//! TOML configuration file for the command.
//!
//! Every key is optional; anything left out keeps the library default.
//!
//! ```toml
//! [scrape]
//! base_url = "https://www.flipkart.com"
//! max_results = 25
//! max_pages = 3
//! timeout_seconds = 10
//! request_delay_ms = [1000, 2000]
//! ```

use crate::error::{AppError, Result};
use flipkart_search::ScrapeConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub scrape: ScrapeSection,
}

/// The `[scrape]` table. Mirrors [`ScrapeConfig`] with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_containers_per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<(u64, u64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load `path` if given, else the default config file if one exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be loaded, or the
    /// default file exists but is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_config_path() {
            Some(default) if default.is_file() => Self::from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the default config file path: `~/.config/flipkart-live/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            Some(PathBuf::from(config).join("flipkart-live").join("config.toml"))
        } else {
            std::env::var_os("HOME").map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("flipkart-live")
                    .join("config.toml")
            })
        }
    }

    /// Overlay the file values onto [`ScrapeConfig::default()`] and validate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the resulting config is invalid.
    pub fn to_scrape_config(&self) -> Result<ScrapeConfig> {
        let s = &self.scrape;
        let defaults = ScrapeConfig::default();
        let config = ScrapeConfig {
            base_url: s.base_url.clone().unwrap_or(defaults.base_url),
            search_path: s.search_path.clone().unwrap_or(defaults.search_path),
            max_results: s.max_results.unwrap_or(defaults.max_results),
            max_pages: s.max_pages.unwrap_or(defaults.max_pages),
            max_containers_per_page: s
                .max_containers_per_page
                .unwrap_or(defaults.max_containers_per_page),
            timeout_seconds: s.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            request_delay_ms: s.request_delay_ms.unwrap_or(defaults.request_delay_ms),
            user_agent: s.user_agent.clone().or(defaults.user_agent),
        };
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(config)
    }
}
