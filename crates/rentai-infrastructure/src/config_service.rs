//! Configuration loading.
//!
//! Priority: environment variables > `config.toml` > built-in defaults.

use std::fs;
use std::path::PathBuf;

use rentai_core::config::AppConfig;
use rentai_core::{RentaiError, Result};

use crate::paths::RentaiPaths;

pub const ENV_RECOMMENDATION_API_URL: &str = "RENTAI_RECOMMENDATION_API_URL";
pub const ENV_SEARCH_API_URL: &str = "RENTAI_SEARCH_API_URL";
pub const ENV_MAP_API_KEY: &str = "RENTAI_MAP_API_KEY";
pub const ENV_STORAGE_DIR: &str = "RENTAI_STORAGE_DIR";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "RENTAI_REQUEST_TIMEOUT_SECS";

pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    /// Service reading `~/.config/rentai/config.toml`.
    pub fn new_default() -> Result<Self> {
        Ok(Self {
            config_path: RentaiPaths::default().config_file()?,
        })
    }

    /// Service reading a custom file (for testing or `--config`).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Loads the file (a missing file means defaults) and applies process
    /// environment overrides.
    pub fn load(&self) -> Result<AppConfig> {
        let config = self.load_file()?;
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    fn load_file(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        toml::from_str(&content).map_err(|e| {
            RentaiError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Storage file honoring `storage_dir`.
    pub fn storage_file(config: &AppConfig) -> Result<PathBuf> {
        let paths = RentaiPaths::new(config.storage_dir.as_ref().map(PathBuf::from));
        Ok(paths.storage_file()?)
    }
}

/// Applies overrides from `lookup`. Empty values unset optional settings.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_RECOMMENDATION_API_URL).filter(|v| !v.trim().is_empty()) {
        config.recommendation_api_url = url;
    }
    if let Some(url) = lookup(ENV_SEARCH_API_URL) {
        config.search_api_url = Some(url).filter(|v| !v.trim().is_empty());
    }
    if let Some(key) = lookup(ENV_MAP_API_KEY) {
        config.map_api_key = Some(key).filter(|v| !v.trim().is_empty());
    }
    if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.trim().is_empty()) {
        config.storage_dir = Some(dir);
    }
    if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            RentaiError::config(format!(
                "{} must be a whole number of seconds, got '{}'",
                ENV_REQUEST_TIMEOUT_SECS, raw
            ))
        })?;
    }
    Ok(config)
}
