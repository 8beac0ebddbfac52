//! Configuration management

use crate::error::{RosetintError, Result};
use crate::infrastructure::data_store::DEFAULT_STORAGE_KEY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "rosetint";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "Config::detect_default_editor")]
    pub editor: String,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: default_storage_key(),
            editor: Self::detect_default_editor(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RosetintError::NotRosetintDirectory(path.to_path_buf())
            } else {
                RosetintError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| RosetintError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Load config, falling back to defaults when no config.toml exists
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from_dir(path) {
            Err(RosetintError::NotRosetintDirectory(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Save config to config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| RosetintError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Whether a directory already holds a config file
    pub fn exists_in(path: &Path) -> bool {
        path.join(CONFIG_FILE).is_file()
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    /// Detect default editor from environment or system
    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }
}

/// Resolve the data directory.
///
/// An explicit path wins, then `ROSETINT_ROOT`, then the platform data
/// directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(root) = std::env::var("ROSETINT_ROOT") {
        if !root.is_empty() {
            return Ok(PathBuf::from(root));
        }
    }

    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| {
            RosetintError::Config(
                "Could not determine a data directory. Set ROSETINT_ROOT or pass --root."
                    .to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "rosetint_blog_data_v3");
        assert!(!config.editor.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage_key = "custom".to_string();

        config.save_to_dir(temp.path()).unwrap();
        assert!(Config::exists_in(temp.path()));

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.storage_key, "custom");
        assert_eq!(loaded.editor, config.editor);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()) {
            Err(RosetintError::NotRosetintDirectory(_)) => {}
            other => panic!("Expected NotRosetintDirectory error, got {:?}", other),
        }

        let config = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "editor = \"vim\"\n").unwrap();

        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.editor, "vim");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "editor = [").unwrap();

        match Config::load_from_dir(temp.path()) {
            Err(RosetintError::Config(msg)) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_explicit_data_dir() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/blog"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/blog"));
    }
}
