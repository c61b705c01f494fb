//! Remote catalog access.
//!
//! This module wraps the external volumes search endpoint: it builds the query,
//! performs the request, and normalizes the response into a [`ResultPage`](crate::ResultPage).
//! It performs no retries and no caching; both are controller concerns.
//!
//! # Modules
//!
//! - `client`: [`CatalogClient`] trait the controller depends on
//! - `google`: `reqwest` implementation for the Google Books endpoint
//! - `response`: wire types and normalization into domain types

pub mod client;
pub mod google;
pub mod response;

pub use client::CatalogClient;
pub use google::{GoogleBooksClient, DEFAULT_ENDPOINT, MAX_PAGE_SIZE};
pub use response::parse_page;
