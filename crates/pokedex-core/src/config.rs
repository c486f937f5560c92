//! Application configuration management.
//!
//! Configuration is stored at `~/.config/pokedex/config.json`. Every field is
//! optional; `POKEDEX_API_URL`, `POKEDEX_PAGE_SIZE` and `POKEDEX_CACHE_DIR`
//! override the file when set.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::api::client::{DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
use crate::api::PokeApiClient;
use crate::catalog::{CatalogCache, DEFAULT_PAGE_SIZE};
use crate::store::FileStore;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "pokedex";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_API_URL: &str = "POKEDEX_API_URL";
const ENV_PAGE_SIZE: &str = "POKEDEX_PAGE_SIZE";
const ENV_CACHE_DIR: &str = "POKEDEX_CACHE_DIR";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub page_size: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub cache_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply `POKEDEX_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => self.page_size = Some(size),
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_PAGE_SIZE),
            }
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|d| !d.trim().is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.filter(|&s| s > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(REQUEST_TIMEOUT_SECS))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Wire a catalog to the configured API host and the on-disk store.
    pub fn open_catalog(&self) -> Result<CatalogCache> {
        let client = PokeApiClient::with_base_url(self.api_base_url(), self.request_timeout())
            .context("Failed to create API client")?;
        let store = FileStore::new(self.cache_dir()?)?;
        Ok(CatalogCache::new(
            Arc::new(client),
            Arc::new(store),
            self.page_size(),
        ))
    }
}
