//! Domain layer for the bookshelf core.
//!
//! This module contains the core domain types, independent of the HTTP client,
//! storage backends, or rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book summary and result page models
//! - [`page`]: Pagination arithmetic

pub mod book;
pub mod error;
pub mod page;

pub use book::{BookSummary, ResultPage};
pub use error::{BookshelfError, Result};
