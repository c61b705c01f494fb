//! View model types representing renderable search state.
//!
//! View models are immutable snapshots computed by
//! [`SearchState::compute_viewmodel`](crate::app::SearchState::compute_viewmodel)
//! and consumed by the renderer. They carry no business logic, only display-ready
//! data: formatted author lines, description excerpts, favorite flags and title
//! highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::ui::{BookCard, PaginationInfo, SearchViewModel};
//!
//! let vm = SearchViewModel {
//!     query: "rust".to_string(),
//!     results_query: "rust".to_string(),
//!     cards: vec![BookCard {
//!         id: "abc".to_string(),
//!         title: "Programming Rust".to_string(),
//!         authors: "Jim Blandy, Jason Orendorff".to_string(),
//!         excerpt: "(empty)".to_string(),
//!         thumbnail: None,
//!         preview_link: None,
//!         is_favorite: true,
//!         highlight_ranges: vec![(12, 16)],
//!     }],
//!     pagination: PaginationInfo { current_page: 1, total_pages: 1, total_items: 1 },
//!     is_loading: false,
//!     error: None,
//!     empty_state: None,
//! };
//! assert_eq!(vm.cards.len(), 1);
//! ```

/// Complete view model for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewModel {
    /// Text currently in the search box (the raw query).
    pub query: String,

    /// Query that produced the displayed cards.
    ///
    /// Differs from `query` while the user is typing or a fetch is in flight.
    pub results_query: String,

    /// Cards in catalog order.
    pub cards: Vec<BookCard>,

    /// Pager state.
    pub pagination: PaginationInfo,

    /// Whether a fetch for the current target is in flight.
    pub is_loading: bool,

    /// Message of the most recent failed fetch, until the next success.
    pub error: Option<String>,

    /// Set when the displayed page has no items.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    /// Catalog identifier, used for favorite toggling.
    pub id: String,

    /// Title, or `(untitled)`.
    pub title: String,

    /// Authors joined with `", "`, or `(empty)`.
    pub authors: String,

    /// Shortened description, or `(empty)`.
    pub excerpt: String,

    /// Thumbnail image URL.
    pub thumbnail: Option<String>,

    /// Catalog preview link.
    pub preview_link: Option<String>,

    /// Whether the id is in the favorites set.
    pub is_favorite: bool,

    /// Character ranges of `title` matched by the results query.
    ///
    /// Each tuple is `(start, end)` in char indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Pager display information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationInfo {
    /// 1-based page being displayed.
    pub current_page: u32,

    /// `ceil(total_items / page_size)`.
    pub total_pages: u32,

    /// Match count reported by the catalog.
    pub total_items: u64,
}

/// Message shown when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
