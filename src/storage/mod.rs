//! Storage layer for persisted client-side state.
//!
//! This module provides the key-value storage abstraction and the favorites store
//! built on top of it.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based implementation with atomic writes
//! - `memory`: in-memory implementation
//! - `favorites`: persisted set of favorited book identifiers

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use favorites::{FavoritesStore, DEFAULT_FAVORITES_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
