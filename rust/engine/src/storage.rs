use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::StorageError;

/// Key/value string store behind the deck registry.
///
/// One bounded read or write per call; no retries happen here.
pub trait Storage {
    /// `Ok(None)` when nothing has been stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self { items }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.get_item("k").unwrap(), None);
        s.set_item("k", "v").unwrap();
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_storage_creates_dirs_and_reads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = FileStorage::new(tmp.path().join("nested").join("data"));
        assert_eq!(s.get_item("decks").unwrap(), None);
        s.set_item("decks", "[]").unwrap();
        assert!(s.path_for("decks").exists());
        assert_eq!(s.get_item("decks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_storage_surfaces_io_errors() {
        let tmp = tempfile::tempdir().unwrap();
        // a regular file where the directory should be
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let mut s = FileStorage::new(&blocker);
        assert!(matches!(s.set_item("k", "v"), Err(StorageError::Io(_))));
    }
}
