//! HTTP catalog client for the Google Books volumes endpoint.

use super::client::CatalogClient;
use super::response::parse_page;
use crate::domain::error::{BookshelfError, Result};
use crate::domain::ResultPage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::Instrument;

/// Default volumes search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Largest `maxResults` the volumes endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 40;

/// `reqwest`-backed [`CatalogClient`].
///
/// Each search is a single `GET <endpoint>?q=..&startIndex=..&maxResults=..`.
/// The client holds a connection pool; cloning it is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    http: Client,
    endpoint: Url,
    page_size: u32,
}

impl GoogleBooksClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Config`] if the endpoint is not an absolute URL,
    /// the page size is outside `1..=40`, or the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::catalog::{GoogleBooksClient, DEFAULT_ENDPOINT};
    /// use std::time::Duration;
    ///
    /// let client = GoogleBooksClient::new(DEFAULT_ENDPOINT, 6, Duration::from_secs(30))?;
    /// # Ok::<(), bookshelf::BookshelfError>(())
    /// ```
    pub fn new(endpoint: &str, page_size: u32, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| BookshelfError::Config(format!("invalid catalog endpoint {endpoint:?}: {e}")))?;

        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(BookshelfError::Config(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bookshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BookshelfError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            page_size,
        })
    }

    /// Builds the request URL for one search.
    fn search_url(&self, query: &str, start_index: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("startIndex", &start_index.to_string())
            .append_pair("maxResults", &self.page_size.to_string());
        url
    }

    async fn fetch_page(&self, query: &str, start_index: u32) -> Result<ResultPage> {
        let url = self.search_url(query, start_index);

        tracing::debug!(url = %url, "sending catalog request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BookshelfError::Transport(format!("catalog request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "catalog returned non-success status");
            return Err(BookshelfError::Transport(format!("catalog responded with {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BookshelfError::Transport(format!("failed to read catalog response: {e}")))?;

        let page = parse_page(&body, start_index, self.page_size)?;

        tracing::debug!(
            item_count = page.items.len(),
            total_items = page.total_items,
            "catalog search complete"
        );
        Ok(page)
    }
}

#[async_trait]
impl CatalogClient for GoogleBooksClient {
    fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn search(&self, query: &str, start_index: u32) -> Result<ResultPage> {
        let span = tracing::debug_span!("catalog_search",
            query = %query,
            start_index = start_index
        );
        self.fetch_page(query, start_index).instrument(span).await
    }
}
