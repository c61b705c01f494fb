//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait: a string-to-string store in the
//! shape of browser local storage. The favorites store persists through it, which
//! lets tests substitute an in-memory backend for the on-disk one.

use crate::domain::error::Result;

/// Durable key-value string storage.
///
/// Implementations must make `set` atomic with respect to the persisted
/// representation: after a crash, a key holds either its previous value or the
/// new one, never a partial write.
///
/// # Implementations
///
/// - [`JsonFileStore`](super::JsonFileStore): single JSON document on disk
///   with atomic writes (default)
/// - [`MemoryStore`](super::MemoryStore): process-local map, for tests and
///   ephemeral sessions
///
/// # Examples
///
/// ```
/// use bookshelf::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("favoriteBooks", "[]")?;
/// assert_eq!(store.get("favoriteBooks")?.as_deref(), Some("[]"));
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing container cannot be read or parsed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The previous value is kept.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
