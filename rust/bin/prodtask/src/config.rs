//! Client-side configuration.
//!
//! Reads/writes `~/.prodtask/config.toml`. Remote endpoints and the token are
//! not here; they live in the local store's settings record.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Path to the local redb file (default: ~/.prodtask/local.redb).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub db_path: String,

    /// Seed data for an empty store: a JSON file, a directory, or an
    /// http(s) URL. Empty means the seed built into the binary.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fixture: String,
}

impl ClientConfig {
    /// Default config file path: ~/.prodtask/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Database path, with `override_path` taking precedence.
    pub fn db_path(&self, override_path: Option<&str>) -> PathBuf {
        match override_path.filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(p),
            None if !self.db_path.is_empty() => PathBuf::from(&self.db_path),
            None => dirs_path().join("local.redb"),
        }
    }

    /// Fixture location, with `override_fixture` taking precedence.
    /// `None` means the embedded seed.
    pub fn fixture<'a>(&'a self, override_fixture: Option<&'a str>) -> Option<&'a str> {
        override_fixture
            .or(Some(self.fixture.as_str()))
            .filter(|f| !f.is_empty())
    }
}

/// Return the prodtask config directory (~/.prodtask).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".prodtask")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.db_path.is_empty());
        assert!(config.fixture(None).is_none());
        assert!(config.db_path(None).ends_with(".prodtask/local.redb"));
    }

    #[test]
    fn test_flags_override_file() {
        let config = ClientConfig {
            db_path: "/var/lib/prodtask/local.redb".to_string(),
            fixture: "/srv/seed".to_string(),
        };
        assert_eq!(
            config.db_path(None),
            PathBuf::from("/var/lib/prodtask/local.redb")
        );
        assert_eq!(config.db_path(Some("/tmp/x.redb")), PathBuf::from("/tmp/x.redb"));
        assert_eq!(config.fixture(None), Some("/srv/seed"));
        assert_eq!(
            config.fixture(Some("http://localhost:8000/data/seed.json")),
            Some("http://localhost:8000/data/seed.json")
        );
    }

    #[test]
    fn test_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let config = ClientConfig {
            db_path: "/data/local.redb".to_string(),
            fixture: String::new(),
        };
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("db_path"));
        assert!(!written.contains("fixture"));

        assert_eq!(ClientConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ClientConfig::load(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
