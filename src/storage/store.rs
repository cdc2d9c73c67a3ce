//! JSON collection storage
//!
//! Every collection lives in its own pretty-printed JSON file under the
//! data directory:
//! ```text
//! <data-dir>/
//! ├── units.json
//! ├── items.json
//! ├── decks.json
//! ├── todos.json
//! ├── timetable.json
//! ├── checklist.json
//! ├── mastery.json
//! ├── streak.json
//! └── selection.json
//! ```
//!
//! Loads are forgiving: a missing or unreadable file yields the caller's
//! fallback (with a warning in the log), never an error. Saves report
//! failures so the CLI can surface them.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// File-backed store of named JSON collections.
pub struct JsonStore {
    base_path: PathBuf,
}

impl JsonStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("swot"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Create the data directory if needed.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }

    /// Load a named collection, returning `fallback` when the file is
    /// absent or cannot be parsed.
    pub fn load<T: DeserializeOwned>(&self, name: &str, fallback: T) -> T {
        let path = self.collection_path(name);
        if !path.exists() {
            return fallback;
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Could not read collection '{}': {}", name, e);
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding malformed collection '{}': {}", name, e);
                fallback
            }
        }
    }

    /// Persist a named collection.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        self.init()?;
        let path = self.collection_path(name);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// Delete the listed collections. Missing files are ignored.
    pub fn wipe(&self, names: &[&str]) -> Result<()> {
        for name in names {
            let path = self.collection_path(name);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_fallback() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        let loaded: Vec<String> = store.load("units", vec!["fallback".to_string()]);
        assert_eq!(loaded, vec!["fallback"]);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        let value = vec![1u32, 2, 3];
        store.save("numbers", &value).unwrap();
        let loaded: Vec<u32> = store.load("numbers", Vec::new());
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_corrupt_file_returns_fallback() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("decks.json"), "{ not json").unwrap();
        let loaded: Vec<u32> = store.load("decks", vec![9]);
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn test_wipe_removes_collections() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        store.save("streak", &1u32).unwrap();
        store.wipe(&["streak", "never-existed"]).unwrap();
        let loaded: u32 = store.load("streak", 7);
        assert_eq!(loaded, 7);
    }
}
