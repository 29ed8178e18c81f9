//! Phonics configuration
//!
//! Config file: ~/.config/phonics/config.toml
//!
//! ```toml
//! [storage]
//! data_dir = "/home/kid/.local/share/phonics"
//! key = "phonics_progress_v1"
//!
//! [catalog]
//! path = "/home/kid/custom_curriculum.json"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::storage::{FileAdapter, PROGRESS_KEY};

/// Overrides the config file location
pub const CONFIG_ENV: &str = "PHONICS_CONFIG";

/// Overrides `storage.data_dir`
pub const DATA_DIR_ENV: &str = "PHONICS_DATA_DIR";

fn default_key() -> String {
    PROGRESS_KEY.to_string()
}

fn default_level() -> String {
    "warn".to_string()
}

/// Where progress is saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Defaults to the platform data dir
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
        }
    }
}

/// Curriculum source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON curriculum; the built-in stages when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when no env filter is set
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhonicsConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PhonicsConfig {
    /// ~/.config/phonics/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("phonics").join("config.toml"))
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. $PHONICS_CONFIG (must exist)
    /// 3. User config, if present
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: PhonicsConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Effective data dir: $PHONICS_DATA_DIR, then config, then platform default
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_data_dir(std::env::var(DATA_DIR_ENV).ok())
    }

    fn resolve_data_dir(&self, env_override: Option<String>) -> PathBuf {
        if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("phonics")
    }

    /// File adapter for the configured slot
    pub fn adapter(&self) -> FileAdapter {
        FileAdapter::new(&self.data_dir(), &self.storage.key)
    }

    /// Configured curriculum, or the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Invalid curriculum in {}", path.display()))
            }
            None => Catalog::builtin().context("Built-in curriculum failed validation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = PhonicsConfig::default();
        assert_eq!(config.storage.key, PROGRESS_KEY);
        assert_eq!(config.logging.level, "warn");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PhonicsConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.key, PROGRESS_KEY);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let mut config = PhonicsConfig::default();
        config.storage.data_dir = Some(dir.path().join("saves"));
        config.storage.key = "child_two".to_string();
        config.save_to(&path).unwrap();

        let loaded = PhonicsConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "storage = [[[").unwrap();
        let err = PhonicsConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));

        assert!(PhonicsConfig::load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_data_dir_resolution() {
        let mut config = PhonicsConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/tmp/from-config"));

        assert_eq!(
            config.resolve_data_dir(Some("/tmp/from-env".to_string())),
            PathBuf::from("/tmp/from-env")
        );
        assert_eq!(config.resolve_data_dir(Some(String::new())), PathBuf::from("/tmp/from-config"));
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("/tmp/from-config"));

        config.storage.data_dir = None;
        assert!(config.resolve_data_dir(None).ends_with("phonics"));
    }

    #[test]
    fn test_load_catalog_builtin_and_custom() {
        let config = PhonicsConfig::default();
        assert_eq!(config.load_catalog().unwrap().stage_count(), 6);

        let dir = tempdir().unwrap();
        let path = dir.path().join("curriculum.json");
        fs::write(&path, "[]").unwrap();
        let mut config = PhonicsConfig::default();
        config.catalog.path = Some(path);
        let err = config.load_catalog().unwrap_err();
        assert!(err.to_string().contains("Invalid curriculum"));
    }
}
