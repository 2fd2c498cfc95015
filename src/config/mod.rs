//! Configuration and backing-file path resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".expense_core";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "expenses.csv";

/// Overrides the application data directory.
pub const HOME_ENV: &str = "EXPENSE_CORE_HOME";
/// Overrides the backing file location, taking precedence over the config.
pub const FILE_ENV: &str = "EXPENSE_CORE_FILE";

/// Returns the application data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backing file override; the default lives in the app data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

/// Loads and saves the JSON configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(app_data_dir())
    }

    #[cfg(test)]
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the config, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolves the backing-file path: environment override first, then the
/// config, then the default inside the app data directory.
pub fn resolve_data_file(config: &Config) -> PathBuf {
    if let Some(custom) = env::var_os(FILE_ENV) {
        return PathBuf::from(custom);
    }
    if let Some(path) = &config.data_file {
        return path.clone();
    }
    app_data_dir().join(DATA_FILE)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn load_returns_defaults_when_file_is_absent() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert!(config.data_file.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            data_file: Some(PathBuf::from("/tmp/elsewhere.csv")),
        };
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.data_file, config.data_file);
    }

    #[test]
    fn config_override_wins_over_the_default_location() {
        let config = Config {
            data_file: Some(PathBuf::from("/tmp/elsewhere.csv")),
        };
        assert_eq!(
            resolve_data_file(&config),
            PathBuf::from("/tmp/elsewhere.csv")
        );
    }
}
