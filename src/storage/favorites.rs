//! Persisted set of favorited book identifiers.
//!
//! The set lives under a single key of a [`KeyValueStore`] as a JSON array of
//! strings, first favorited first. The backend is the only copy: every query
//! reads it and every toggle rewrites the whole array, so there is nothing to
//! invalidate.
//!
//! Storage problems never escape this module. An absent key is an empty set, a
//! payload that is not a string array is logged and treated as empty, and a
//! failed write leaves the previous set in place.

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashSet;

/// Storage key used by default.
pub const DEFAULT_FAVORITES_KEY: &str = "favoriteBooks";

/// Favorites store over an injected storage backend.
///
/// # Examples
///
/// ```
/// use bookshelf::storage::{FavoritesStore, MemoryStore};
///
/// let mut favorites = FavoritesStore::new(Box::new(MemoryStore::new()), "favoriteBooks");
/// assert!(favorites.toggle("zyTCAlFPjgYC"));
/// assert!(favorites.is_favorite("zyTCAlFPjgYC"));
/// assert!(!favorites.toggle("zyTCAlFPjgYC"));
/// assert!(favorites.all().is_empty());
/// ```
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl FavoritesStore {
    /// Creates a store persisting under `key` in `backend`.
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Flips membership of `id` and persists the whole set.
    ///
    /// Returns the membership after the toggle, `true` meaning "now favorited".
    /// If the write fails the persisted set is unchanged and the returned value
    /// reflects that unchanged membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        let _span = tracing::debug_span!("favorites_toggle", id = %id).entered();

        let mut ids = self.load();
        let was_favorite = match ids.iter().position(|existing| existing == id) {
            Some(index) => {
                ids.remove(index);
                true
            }
            None => {
                ids.push(id.to_string());
                false
            }
        };

        match self.write(&ids) {
            Ok(()) => {
                tracing::debug!(favorite = !was_favorite, count = ids.len(), "favorite toggled");
                !was_favorite
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to persist favorites");
                was_favorite
            }
        }
    }

    /// Returns whether `id` is in the persisted set.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.load().iter().any(|existing| existing == id)
    }

    /// Returns the full persisted set.
    #[must_use]
    pub fn all(&self) -> HashSet<String> {
        self.load().into_iter().collect()
    }

    /// Returns the persisted identifiers in the order they were favorited.
    #[must_use]
    pub fn ordered(&self) -> Vec<String> {
        self.load()
    }

    /// Reads the set, recovering from any storage problem with an empty set.
    fn load(&self) -> Vec<String> {
        match self.read() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "favorites unreadable, using empty set");
                Vec::new()
            }
        }
    }

    /// Reads and validates the stored payload.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::StorageCorrupt`] if the payload is not a JSON
    /// array of strings, or the backend's error if it cannot be read.
    fn read(&self) -> Result<Vec<String>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };

        let parsed: Vec<String> = serde_json::from_str(&raw)
            .map_err(|e| BookshelfError::StorageCorrupt(format!("{}: {e}", self.key)))?;

        let mut seen = HashSet::with_capacity(parsed.len());
        Ok(parsed.into_iter().filter(|id| seen.insert(id.clone())).collect())
    }

    /// Serializes and stores the complete set in one backend write.
    fn write(&mut self, ids: &[String]) -> Result<()> {
        let json = serde_json::to_string(ids)
            .map_err(|e| BookshelfError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.backend.set(&self.key, &json)
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
