//! Configuration file handling
//!
//! ```toml
//! # ~/.config/cognition/config.toml
//! data_dir = "/home/me/cards"
//! user_id = "6f1c2a8e-4b7d-4c43-9a55-2f0d8e9b1c77"
//! ```
//!
//! Every field is optional; command line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Session;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where card files are kept (default: platform data dir + "cognition")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// User to act as; without it only demo cards are readable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Config {
    /// Get the default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cognition").join("config.toml"))
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("cognition"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicitly given config file, or the default one if it exists.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default_path) if default_path.exists() => {
                log::debug!("Loading config from {:?}", default_path);
                Self::load(&default_path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Resolve the data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Session for the configured user
    pub fn session(&self) -> Session {
        Session::from_owner(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let user_id = Uuid::new_v4();
        fs::write(
            &path,
            format!("data_dir = \"/tmp/cards\"\nuser_id = \"{}\"\n", user_id),
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/cards")));
        assert_eq!(config.user_id, Some(user_id));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/cards"));
        assert!(config.session().is_authenticated());
    }

    #[test]
    fn test_empty_config_is_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.session().is_authenticated());
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "user_id = \"not-a-uuid\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let result = Config::load_or_default(Some(&path));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
