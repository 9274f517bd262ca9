//! Unified path management for RentAI files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/rentai/            # Config directory (platform default)
//! ├── config.toml              # Client configuration
//! └── storage.json             # Durable key/value storage (token, snapshots)
//! ```
//!
//! `RENTAI_STORAGE_DIR` or `storage_dir` in `config.toml` relocates
//! `storage.json`; the config file always lives in the config directory.

use std::path::PathBuf;

const APP_DIR: &str = "rentai";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for rentai_core::RentaiError {
    fn from(err: PathError) -> Self {
        rentai_core::RentaiError::config(err.to_string())
    }
}

/// Path resolver with an optional base directory override (used by tests and
/// by `storage_dir`).
#[derive(Debug, Clone, Default)]
pub struct RentaiPaths {
    base_override: Option<PathBuf>,
}

impl RentaiPaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Returns the RentAI configuration directory (e.g. `~/.config/rentai/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(STORAGE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used() {
        let paths = RentaiPaths::new(Some(PathBuf::from("/tmp/rentai-test")));
        assert_eq!(
            paths.storage_file().unwrap(),
            PathBuf::from("/tmp/rentai-test/storage.json")
        );
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/rentai-test/config.toml")
        );
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        if let Ok(dir) = RentaiPaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }
}
