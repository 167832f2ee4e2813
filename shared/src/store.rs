//! Settings store
//!
//! A flat string key-value store. The app uses [`FileStore`]; tests swap in
//! [`MemoryStore`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{self, ConfigError};

/// Get/set access to persisted string values
pub trait SettingsStore {
    /// Look up a value. Absent and empty values both read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML table on disk
///
/// The file is read once on open; each `set` rewrites it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store for a clock in the shared config directory
    pub fn for_clock(clock_name: &str) -> Result<Self, ConfigError> {
        let path = config::config_path(clock_name).ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    /// Open a store at an explicit path
    ///
    /// A missing file is an empty store. An unreadable file is logged and
    /// also treated as empty; the next `set` overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match config::read_toml::<BTreeMap<String, String>>(&path) {
            Ok(Some(values)) => {
                debug!("Loaded {} settings from {}", values.len(), path.display());
                values
            }
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        config::write_toml(&self.path, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("clockColor").is_none());
        store.set("clockColor", "#123").unwrap();
        assert_eq!(store.get("clockColor").as_deref(), Some("#123"));
        store.set("clockColor", "#456").unwrap();
        assert_eq!(store.get("clockColor").as_deref(), Some("#456"));
    }

    #[test]
    fn test_empty_value_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("backgroundColor", "").unwrap();
        assert!(store.get("backgroundColor").is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gesture_clock.toml");

        let mut store = FileStore::open(&path);
        store.set("showSeconds", "true").unwrap();
        store.set("clockColor", "#0f0").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("showSeconds").as_deref(), Some("true"));
        assert_eq!(reopened.get("clockColor").as_deref(), Some("#0f0"));
        assert!(reopened.get("use12HFormat").is_none());
    }

    #[test]
    fn test_file_store_with_broken_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gesture_clock.toml");
        std::fs::write(&path, "[[[").unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.get("clockColor").is_none());
        store.set("clockColor", "#fff").unwrap();
        assert_eq!(FileStore::open(&path).get("clockColor").as_deref(), Some("#fff"));
    }

    #[test]
    fn test_file_store_write_error_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.set("clockColor", "#fff").is_err());
    }
}
