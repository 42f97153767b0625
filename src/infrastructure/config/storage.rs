//! Configuration and settings persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::remote_config::RemoteConfig;
use crate::domain::ports::SettingsPort;

const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "murale";
const APP_NAME: &str = "murale";
const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization failure.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// Deserialization failure.
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// On-disk settings blob: the HD-thumbnails flag and the favorites set,
/// addressed by fixed keys, no schema versioning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Whether the grid loads full-resolution variants for thumbnails.
    #[serde(default)]
    pub hd_thumbnails: bool,
    /// Favorited canonical URLs, order not meaningful.
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// Owns the configuration directory and the files inside it.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Creates a manager rooted at the platform config directory.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration directory cannot be
    /// determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a manager rooted at a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensures the configuration directory exists.
    ///
    /// # Errors
    /// Returns `ConfigError` if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!("Creating configuration directory at {:?}", self.config_dir);
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Loads the remote backend configuration.
    ///
    /// Never fails hard: a missing file is replaced with a written-out
    /// placeholder, a corrupt file degrades to the placeholder with a
    /// warning. The app continues in degraded mode either way.
    #[must_use]
    pub fn load_remote_config(&self, path_override: Option<&Path>) -> RemoteConfig {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            std::path::Path::to_path_buf,
        );

        if !config_path.exists() {
            warn!(
                path = %config_path.display(),
                "Remote config not found, continuing with placeholder"
            );
            let placeholder = RemoteConfig::placeholder();
            if let Err(e) = self
                .ensure_config_dir()
                .and_then(|()| Self::save_to_file(&config_path, &placeholder))
            {
                warn!("Failed to write placeholder config: {e}");
            }
            return placeholder;
        }

        match fs::read_to_string(&config_path)
            .map_err(ConfigError::from)
            .and_then(|content| toml::from_str::<RemoteConfig>(&content).map_err(ConfigError::from))
        {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse remote config: {e}. Using placeholder.");
                RemoteConfig::placeholder()
            }
        }
    }

    /// Loads the settings state, resetting to defaults when missing or
    /// corrupt.
    #[must_use]
    pub fn load_settings(&self) -> StoredSettings {
        let state_path = self.config_dir.join(STATE_FILE_NAME);

        if !state_path.exists() {
            return StoredSettings::default();
        }

        match fs::read_to_string(&state_path) {
            Ok(content) => match toml::from_str::<StoredSettings>(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Failed to parse settings state: {e}. Resetting.");
                    StoredSettings::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings state: {e}. Resetting.");
                StoredSettings::default()
            }
        }
    }

    /// Saves the settings state atomically.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_settings(&self, state: &StoredSettings) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        let state_path = self.config_dir.join(STATE_FILE_NAME);
        Self::save_to_file(&state_path, state)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

/// [`SettingsPort`] adapter over [`StorageManager`] with a write-through
/// in-memory copy.
///
/// Reads come from the cached copy (loaded once at construction); every
/// mutation persists the whole blob synchronously. Persist failures are
/// logged and otherwise invisible to the caller.
pub struct SettingsStore {
    manager: StorageManager,
    cached: Mutex<StoredSettings>,
}

impl SettingsStore {
    /// Creates a store, loading current state from disk.
    #[must_use]
    pub fn new(manager: StorageManager) -> Self {
        let cached = Mutex::new(manager.load_settings());
        Self { manager, cached }
    }

    fn persist(&self, state: &StoredSettings) {
        if let Err(e) = self.manager.save_settings(state) {
            warn!("Failed to persist settings: {e}");
        }
    }
}

impl SettingsPort for SettingsStore {
    fn favorites(&self) -> Vec<String> {
        self.cached.lock().favorites.clone()
    }

    fn set_favorites(&self, ids: &[String]) {
        let mut state = self.cached.lock();
        state.favorites = ids.to_vec();
        self.persist(&state);
    }

    fn hd_thumbnails(&self) -> bool {
        self.cached.lock().hd_thumbnails
    }

    fn set_hd_thumbnails(&self, enabled: bool) {
        let mut state = self.cached.lock();
        state.hd_thumbnails = enabled;
        self.persist(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_config_dir_creates_directory() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("murale");
        let manager = StorageManager::with_dir(config_path.clone());

        assert!(!config_path.exists());
        manager.ensure_config_dir().unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_missing_remote_config_degrades_to_placeholder() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let config = manager.load_remote_config(None);
        assert_eq!(config.database_url, RemoteConfig::placeholder().database_url);

        // The placeholder was written out for the user to edit.
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_corrupt_remote_config_degrades_without_overwriting() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "invalid_toml = [").unwrap();

        let config = manager.load_remote_config(None);
        assert_eq!(config.preferred_thumbnail_suffix, "l");
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "invalid_toml = [");
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let state = StoredSettings {
            hd_thumbnails: true,
            favorites: vec!["https://i.imgur.com/a.jpg".to_string()],
        };
        manager.save_settings(&state).unwrap();

        let loaded = manager.load_settings();
        assert!(loaded.hd_thumbnails);
        assert_eq!(loaded.favorites, state.favorites);
    }

    #[test]
    fn test_corrupt_settings_reset_to_default() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(STATE_FILE_NAME), "favorites = 3").unwrap();

        let loaded = manager.load_settings();
        assert!(!loaded.hd_thumbnails);
        assert!(loaded.favorites.is_empty());
    }

    #[test]
    fn test_settings_store_writes_through() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(StorageManager::with_dir(dir.path().to_path_buf()));

        store.set_hd_thumbnails(true);
        store.set_favorites(&["https://i.imgur.com/a.jpg".to_string()]);

        // A fresh store sees the persisted state.
        let reloaded = SettingsStore::new(StorageManager::with_dir(dir.path().to_path_buf()));
        assert!(reloaded.hd_thumbnails());
        assert_eq!(reloaded.favorites().len(), 1);
    }
}
