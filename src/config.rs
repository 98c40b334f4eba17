//! Configuration management for rdelta

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default block/window size in bytes
pub const DEFAULT_WINDOW_SIZE: usize = 64;

/// Minimum window size
pub const MIN_WINDOW_SIZE: usize = 1;

/// Maximum window size (1MB; larger windows stop finding useful matches)
pub const MAX_WINDOW_SIZE: usize = 1024 * 1024;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Block/window size in bytes for signatures and delta computation
    pub window_size: usize,

    /// Verbose logging level (0-3)
    pub verbose: u8,

    /// Emit delta output as JSON instead of per-operation lines
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            verbose: 0,
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io("reading config", e))?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io("creating config dir", e))?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("serializing config: {}", e)))?;
        std::fs::write(path, contents).map_err(|e| Error::io("writing config", e))?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("rdelta").join("config.toml"))
            .ok_or_else(|| Error::config("could not determine config directory"))
    }

    /// Validate and clamp a window size to the supported range
    pub fn validate_window_size(bytes: usize) -> usize {
        bytes.clamp(MIN_WINDOW_SIZE, MAX_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.window_size, DEFAULT_WINDOW_SIZE);
        assert!(!config.json);
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            window_size: 128,
            verbose: 2,
            json: true,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.window_size, 128);
        assert_eq!(loaded.verbose, 2);
        assert!(loaded.json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "window_size = 32\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.window_size, 32);
        assert_eq!(loaded.verbose, 0);
    }

    #[test]
    fn test_validate_window_size() {
        assert_eq!(Config::validate_window_size(0), MIN_WINDOW_SIZE);
        assert_eq!(Config::validate_window_size(64), 64);
        assert_eq!(Config::validate_window_size(usize::MAX), MAX_WINDOW_SIZE);
    }
}
