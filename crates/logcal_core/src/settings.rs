//! Plugin settings and their JSON persistence.
//!
//! # Responsibility
//! - Define the two user-facing settings and their defaults.
//! - Read host-persisted JSON, merging missing fields with defaults.
//!
//! # Invariants
//! - Field names on disk are `logsFolder` / `debugMode`.
//! - A missing settings file yields defaults, never an error.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Default log folder, relative to the vault root.
pub const DEFAULT_LOGS_FOLDER: &str = "Logs/BM";

/// User settings persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub logs_folder: String,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logs_folder: DEFAULT_LOGS_FOLDER.to_string(),
            debug_mode: false,
        }
    }
}

impl Settings {
    /// Parses persisted JSON; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(SettingsError::Parse)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Parse)
    }

    /// Configured folder as a path, surrounding whitespace and trailing
    /// slashes removed.
    pub fn logs_folder_path(&self) -> PathBuf {
        let trimmed = self.logs_folder.trim();
        let without_slash = trimmed.trim_end_matches('/');
        if without_slash.is_empty() {
            PathBuf::from(trimmed)
        } else {
            PathBuf::from(without_slash)
        }
    }
}

/// Settings persistence errors.
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "settings file `{}` is not accessible: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "settings json is invalid: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

/// Loads settings from a JSON file, returning defaults when it is absent.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Settings::from_json(&raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes settings as pretty JSON, creating parent folders as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_err = |source: io::Error| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = settings.to_json()?;
    std::fs::write(path, json).map_err(io_err)
}
