//! JSON file-based storage backend.
//!
//! This module provides a human-readable key-value store kept in a single JSON
//! document. Writes go to a temporary file that is then renamed over the target,
//! so the document on disk is always either the previous or the new version.
//!
//! The file is the source of truth: every `get` reads it again and every `set`
//! performs a read-modify-write. Nothing is cached between calls, so edits made
//! by another process between two calls are observed.

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1718000000,
///   "entries": {
///     "favoriteBooks": "[\"zyTCAlFPjgYC\"]"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the container format for future migrations.
    version: u32,

    /// Unix timestamp of the last successful write.
    #[serde(default)]
    updated_at: i64,

    /// Raw string values by key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: 0,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file [`KeyValueStore`].
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is meant to be owned by one favorites
/// store on the controller's task.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Opens a store at `file_path`, creating parent directories as needed.
    ///
    /// The file itself is not created until the first write; a missing file
    /// reads as an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookshelf::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/bookshelf/storage.json"))?;
    /// # Ok::<(), bookshelf::BookshelfError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the container, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load(&self) -> Result<StorageData> {
        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!("storage file absent, treating as empty");
                return Ok(StorageData::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents)
            .map_err(|e| BookshelfError::Storage(format!("failed to parse JSON: {e}")))
    }

    /// Loads the container for a write, starting fresh if it is unreadable.
    fn load_for_write(&self) -> Result<StorageData> {
        match self.load() {
            Ok(data) => Ok(data),
            Err(BookshelfError::Storage(reason)) => {
                tracing::warn!(path = ?self.file_path, reason = %reason, "replacing unreadable storage file");
                Ok(StorageData::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the container using write-to-temp + rename.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename fails.
    fn save(&self, mut data: StorageData) -> Result<()> {
        data.updated_at = chrono::Utc::now().timestamp();

        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| BookshelfError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(entries = data.entries.len(), "storage saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("json_get", key = %key).entered();

        let value = self.load()?.entries.remove(key);

        tracing::debug!(found = value.is_some(), "lookup complete");
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key, len = value.len()).entered();

        let mut data = self.load_for_write()?;
        data.entries.insert(key.to_string(), value.to_string());
        self.save(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("nested").join("storage.json")).unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("favoriteBooks").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("favoriteBooks", r#"["a","b"]"#).unwrap();
        store.set("other", "1").unwrap();
        drop(store);

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("favoriteBooks").unwrap().as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn writes_leave_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("k", "v").unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn external_edits_are_observed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("k", "before").unwrap();

        let mut other = store_in(&dir);
        other.set("k", "after").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("after"));
    }

    #[test]
    fn corrupt_container_fails_reads_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        std::fs::write(store.path(), "{ definitely not json").unwrap();

        assert!(matches!(store.get("k"), Err(BookshelfError::Storage(_))));

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
