//! Settings storage and persistence.

use crate::ClickerSettings;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Get the app data directory for clikr.
pub fn get_app_data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("clikr")
}

/// Path of the user settings file.
pub fn settings_path() -> PathBuf {
    get_app_data_dir().join("settings.yaml")
}

/// Directory for rolling log files.
pub fn log_dir() -> PathBuf {
    get_app_data_dir().join("logs")
}

/// Load settings from the default location.
pub fn load_settings() -> ClickerSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`.
///
/// A missing or unreadable file yields defaults; fields absent from the file
/// are filled with defaults.
pub fn load_settings_from(path: &Path) -> ClickerSettings {
    if !path.exists() {
        debug!(?path, "No settings file found, using defaults");
        return ClickerSettings::default();
    }

    let parsed = fs::read_to_string(path)
        .map_err(StorageError::from)
        .and_then(|content| serde_yaml::from_str::<ClickerSettings>(&content).map_err(StorageError::from));

    match parsed {
        Ok(settings) => {
            info!(?path, "Loaded settings");
            settings
        }
        Err(e) => {
            warn!(?path, error = %e, "Failed to load settings, using defaults");
            ClickerSettings::default()
        }
    }
}

/// Save settings to the default location.
pub fn save_settings(settings: &ClickerSettings) -> StorageResult<PathBuf> {
    let path = settings_path();
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// Save settings to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &ClickerSettings) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            info!(dir = ?parent, "Created settings directory");
        }
    }

    let yaml = serde_yaml::to_string(settings)?;
    fs::write(path, yaml)?;

    info!(?path, "Saved settings");
    Ok(())
}
