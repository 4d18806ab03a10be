//! kbtext configuration management

use crate::error::{Error, Result};
use crate::knowledge::KnowledgeFile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main kbtext configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KbConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Knowledge file configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the `kbtext` target when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Knowledge file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the knowledge file
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: KnowledgeFile::default_path(),
        }
    }
}

impl KbConfig {
    /// Default config location (~/.kbtext/config.toml)
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kbtext")
            .join("config.toml")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` if given, else from the default location if it exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Self::default_path();
                if default.is_file() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn knowledge_file(&self) -> KnowledgeFile {
        KnowledgeFile::new(&self.store.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KbConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.store.path, KnowledgeFile::default_path());
    }

    #[test]
    fn test_partial_toml() {
        let config = KbConfig::from_toml("[logging]\njson = true\n").unwrap();
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.store.path, KnowledgeFile::default_path());
    }

    #[test]
    fn test_empty_toml() {
        let config = KbConfig::from_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = KbConfig::default();
        config.store.path = PathBuf::from("/tmp/agent/kb.txt");
        config.logging.level = "debug".to_string();

        let toml = config.to_toml().unwrap();
        let parsed = KbConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed.store.path, PathBuf::from("/tmp/agent/kb.txt"));
        assert_eq!(parsed.logging.level, "debug");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = KbConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = KbConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_or_default_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\npath = \"/srv/kb.txt\"\n").unwrap();

        let config = KbConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.knowledge_file().path(), Path::new("/srv/kb.txt"));
    }
}
