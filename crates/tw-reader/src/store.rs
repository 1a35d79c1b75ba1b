//! Persistent key-value storage for progress and preferences.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Key of the saved-progress slot.
pub const SAVED_PROGRESS_KEY: &str = "savedProgress";
/// Key of the theme preference.
pub const THEME_KEY: &str = "theme";
/// Key of the language preference.
pub const LANGUAGE_KEY: &str = "language";
/// Key of the font-size preference.
pub const FONT_SIZE_KEY: &str = "fontSize";

/// String values under fixed keys, last write wins.
pub trait KeyValueStore {
    /// Read a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Values kept in memory for the lifetime of the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;
        std::fs::write(self.path(key), value).map_err(|e| io_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        store.set(THEME_KEY, "fantasy").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("fantasy"));

        store.remove(THEME_KEY).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.remove(THEME_KEY).unwrap();
    }

    #[test]
    fn memory_store_last_write_wins() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn file_store_last_write_wins() {
        let dir = TempDir::new().unwrap();
        exercise(&mut FileStore::new(dir.path().join("data")));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let mut first = FileStore::new(dir.path());
        first.set(LANGUAGE_KEY, "fr").unwrap();

        let second = FileStore::new(dir.path());
        assert_eq!(second.get(LANGUAGE_KEY).unwrap().as_deref(), Some("fr"));
        assert!(second.dir().join(LANGUAGE_KEY).exists());
    }
}
