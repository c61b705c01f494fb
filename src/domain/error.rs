//! Error types for the bookshelf core.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type alias
//! [`Result`] used throughout the crate. Catalog failures are split into transport
//! and decode errors so the controller can decide what is worth retrying; storage
//! failures are recovered inside the favorites store and never reach the renderer.

use thiserror::Error;

/// The main error type for bookshelf operations.
///
/// # Examples
///
/// ```
/// use bookshelf::BookshelfError;
///
/// let err = BookshelfError::Transport("connection refused".to_string());
/// assert!(err.is_retryable());
///
/// let err = BookshelfError::Decode("expected value at line 1".to_string());
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// The catalog could not be reached or answered with a non-2xx status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The catalog answered, but the body was not well-formed JSON of the
    /// expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The persisted favorites payload is not a JSON array of strings.
    #[error("Corrupt favorites payload: {0}")]
    StorageCorrupt(String),

    /// A storage backend failed to read or write its container.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookshelfError {
    /// Returns `true` when repeating the same request could succeed.
    ///
    /// Only transport failures qualify. A body that failed to decode will fail
    /// the same way again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A specialized `Result` type for bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
