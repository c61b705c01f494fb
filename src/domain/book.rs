//! Book summary and result page domain models.

use serde::{Deserialize, Serialize};

/// A single catalog entry, normalized from the remote record.
///
/// Immutable once received. Only the fields the rendering layer needs are kept;
/// everything else the catalog sends is dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Stable catalog identifier, unique per entry.
    pub id: String,

    /// Title, when the catalog provides one.
    pub title: Option<String>,

    /// Authors in catalog order. May be empty.
    pub authors: Vec<String>,

    /// Free-text description. Empty when absent.
    pub description: String,

    /// Thumbnail image URL.
    pub thumbnail: Option<String>,

    /// Link to the catalog's preview page.
    pub preview_link: Option<String>,
}

impl BookSummary {
    /// Creates a summary with only an identifier and title set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::BookSummary;
    ///
    /// let book = BookSummary::new("zyTCAlFPjgYC", "The Google Story");
    /// assert!(book.authors.is_empty());
    /// assert_eq!(book.description, "");
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            authors: Vec::new(),
            description: String::new(),
            thumbnail: None,
            preview_link: None,
        }
    }
}

/// One page of search results, exactly as the catalog ordered them.
///
/// `items.len()` never exceeds the page size that produced the page. A page is only
/// meaningful together with the query that produced it; the controller keeps the
/// two side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Items in API order.
    pub items: Vec<BookSummary>,

    /// Authoritative match count reported by the catalog.
    pub total_items: u64,

    /// 1-based page number.
    pub current_page: u32,
}

impl ResultPage {
    /// An empty first page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            current_page: 1,
        }
    }

    /// Number of pages available for this result set at the given page size.
    #[must_use]
    pub fn total_pages(&self, page_size: u32) -> u32 {
        super::page::total_pages(self.total_items, page_size)
    }
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty()
    }
}
