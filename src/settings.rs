//! Persistent application settings.
//!
//! Stored as JSON at `<config dir>/tabplot/settings.json`. A missing file
//! yields the defaults; unknown or absent keys fall back per field.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_CONNECT_TIMEOUT_SECS, HISTORY_FILE_NAME,
    SETTINGS_FILE_NAME,
};
use crate::data::{DataError, DataResult, OpenOptions, ReaderRegistry, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Chart history database. Defaults to the user data directory.
    pub history_path: Option<PathBuf>,
    /// Connect timeout for remote engines; `None` waits indefinitely
    pub connect_timeout_secs: Option<u64>,
    /// Treat numeric zero as an empty parameter value
    pub reject_zero_values: bool,
    /// Suffixes accepted for file sources
    pub allowed_extensions: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            history_path: None,
            connect_timeout_secs: Some(DEFAULT_CONNECT_TIMEOUT_SECS),
            reject_zero_values: true,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppSettings {
    /// Location of the settings file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Load from the default location
    pub fn load() -> DataResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("No config directory on this platform, using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> DataResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map_err(|e| DataError::Settings(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> DataResult<()> {
        let path = Self::default_path()
            .ok_or_else(|| DataError::Settings("no config directory".to_string()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> DataResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Chart history database path, configured or default
    pub fn resolved_history_path(&self) -> DataResult<PathBuf> {
        if let Some(path) = &self.history_path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(HISTORY_FILE_NAME))
            .ok_or_else(|| DataError::Settings("no data directory for chart history".to_string()))
    }

    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            validate: true,
            policy: ValidationPolicy {
                reject_zero: self.reject_zero_values,
            },
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Builtin readers behind this allow-list
    pub fn registry(&self) -> ReaderRegistry {
        ReaderRegistry::with_allowed_extensions(&self.allowed_extensions)
    }
}
