use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Synchronous key-value storage holding serialized drafts.
///
/// The editor receives one of these at construction instead of reaching for
/// a process-wide location, so tests can hand it an in-memory map.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing what was there.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be modified.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Storage kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::StorageRead {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let write_error = |source| Error::StorageWrite {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_error)?;
        fs::write(self.path_for(key), value).map_err(write_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(Error::StorageRemove {
                key: key.to_string(),
                source: err,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_storage_get_set_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_dir_and_round_trips() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested").join("drafts"));
        assert_eq!(storage.get("draft_post").unwrap(), None);

        storage.set("draft_post", "{}").unwrap();
        assert!(storage.path_for("draft_post").exists());
        assert_eq!(storage.get("draft_post").unwrap().as_deref(), Some("{}"));

        storage.set("draft_post", "[]").unwrap();
        assert_eq!(storage.get("draft_post").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.remove("draft_post").unwrap();
        storage.set("draft_post", "x").unwrap();
        storage.remove("draft_post").unwrap();
        assert!(!storage.path_for("draft_post").exists());
    }
}
