//! Where clock settings live on disk, and the TOML encoding used there
//!
//! Each clock keeps one flat `<clock>.toml` table under the clock-series
//! directory. [`crate::store::FileStore`] is the only writer.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure to locate, load or persist a settings table
#[derive(Debug)]
pub enum ConfigError {
    /// The platform reports no per-user config location
    NoConfigDir,
    /// The settings file or its directory could not be read or written
    Io(io::Error),
    /// The settings file is not a valid TOML table
    Parse(toml::de::Error),
    /// A settings table could not be encoded
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "no per-user settings directory"),
            ConfigError::Io(e) => write!(f, "settings file I/O failed: {}", e),
            ConfigError::Parse(e) => write!(f, "settings file is not valid TOML: {}", e),
            ConfigError::Serialize(e) => write!(f, "could not encode settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Per-user directory holding every clock's settings table
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "clock-series", "clocks")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// `<dir>/<clock_name>.toml`, e.g. `gesture_clock.toml`
pub fn config_path(clock_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", clock_name)))
}

/// Load a settings table
///
/// A clock that has never saved has no file, which reads as `Ok(None)`.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let value: T = toml::from_str(&contents)?;
    Ok(Some(value))
}

/// Replace the table at `path`; the first save also creates the directory
pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(())
}
