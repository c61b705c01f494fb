//! Catalog client abstraction.
//!
//! This module defines the [`CatalogClient`] trait that the search controller
//! talks to. The trait is deliberately small: one search call and the page size
//! it was configured with, so the controller computes offsets and page counts
//! with the same constant the client sends as `maxResults`.

use crate::domain::error::Result;
use crate::domain::ResultPage;
use async_trait::async_trait;

/// Read-only access to a remote book catalog.
///
/// Implementations must not retry or cache: retry policy belongs to the caller,
/// which is the only party that knows whether a query is still current.
///
/// # Implementations
///
/// - [`GoogleBooksClient`](super::GoogleBooksClient): HTTP client for the
///   volumes search endpoint
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Number of items requested per search.
    fn page_size(&self) -> u32;

    /// Searches the catalog for `query`, starting at the zero-based `start_index`.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Transport`](crate::BookshelfError::Transport) if
    /// the request fails or the status is not 2xx, and
    /// [`BookshelfError::Decode`](crate::BookshelfError::Decode) if the body is
    /// not a well-formed response.
    async fn search(&self, query: &str, start_index: u32) -> Result<ResultPage>;
}
