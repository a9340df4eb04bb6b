//! Application settings persistence for the penalty register.
//!
//! Stores user preferences (database location, edit strategy) in a JSON file
//! at an OS-appropriate location.

use crate::{EditStrategy, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "penalty-committee";
const DATABASE_FILE: &str = "penalty_system.db";

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// SQLite file holding the `records` table.
    pub database_path: PathBuf,

    /// How the Edit button applies changes; older settings files lack this key.
    #[serde(default)]
    pub edit_strategy: EditStrategy,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            edit_strategy: EditStrategy::default(),
        }
    }
}

/// Returns the path to the settings JSON file: `<config dir>/penalty-committee/settings.json`.
pub fn settings_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("settings.json")
}

/// Returns the default database location: `<data dir>/penalty-committee/penalty_system.db`.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DATABASE_FILE)
}

/// Loads settings from the default location; see [`load_settings_from`].
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings file {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to the default location; see [`save_settings_to`].
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(settings, settings_file_path())
}

/// Saves settings to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`crate::PenaltyError::Io`] if the directory or file cannot be
/// written, or [`crate::PenaltyError::Json`] if serialisation fails.
pub fn save_settings_to<P: AsRef<Path>>(settings: &AppSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
