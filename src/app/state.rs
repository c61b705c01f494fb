//! Search state and view model computation.
//!
//! [`SearchState`] is the single source of truth for everything the controller
//! shows: the raw and settled queries, the last good result page together with
//! the query that produced it, and the bookkeeping that keeps late fetches from
//! overwriting newer ones.
//!
//! # State Components
//!
//! - **Raw query**: every keystroke, shown in the search box
//! - **Settled query**: the raw query after the debounce window
//! - **Displayed page**: last successfully applied page plus its `results_query`
//! - **Target**: the (query, page) the controller is currently trying to show
//! - **Generation**: tag of the latest issued fetch; older completions are stale
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::SearchState;
//! use bookshelf::ResultPage;
//! use std::collections::HashSet;
//!
//! let state = SearchState::new("example books", ResultPage::empty(), 6, 0);
//! let vm = state.compute_viewmodel(&HashSet::new());
//! assert!(vm.empty_state.is_some());
//! ```

use crate::domain::{page, BookSummary, BookshelfError, ResultPage};
use crate::ui::viewmodel::{BookCard, EmptyState, PaginationInfo, SearchViewModel};
use crate::worker::{FetchRequest, Generation};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::{BTreeSet, HashSet};

/// Descriptions longer than this many characters get an ellipsis.
const EXCERPT_THRESHOLD: usize = 30;

/// Characters of the description kept in an excerpt.
const EXCERPT_LENGTH: usize = 60;

const EMPTY_FIELD: &str = "(empty)";
const UNTITLED: &str = "(untitled)";

/// Whether a fetch for the current target is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in flight for the latest generation.
    #[default]
    Idle,
    /// A fetch tagged with the latest generation has not completed yet.
    Fetching,
}

/// The (query, page) pair the controller is trying to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Query being fetched or displayed.
    pub query: String,
    /// 1-based page being fetched or displayed.
    pub page: u32,
}

/// Central search state container.
///
/// Mutated only by [`handle_event`](crate::app::handle_event). The displayed page
/// changes exclusively through [`SearchState::apply_page`], which the handler calls
/// for successful completions of the latest generation.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Text as typed, updated on every keystroke.
    pub raw_query: String,

    /// Last value emitted by the debouncer.
    pub settled_query: String,

    /// Query that produced `page`.
    pub results_query: String,

    /// Last good result page.
    pub page: ResultPage,

    /// What the controller is currently trying to show.
    ///
    /// Equals the displayed pair while idle.
    pub target: Target,

    /// Tag of the most recently issued fetch.
    pub generation: Generation,

    /// Fetch phase of the latest generation.
    pub phase: Phase,

    /// Message of the last terminal fetch failure, cleared by the next success.
    pub last_error: Option<String>,

    /// Items per page, used for offsets and page counts.
    pub page_size: u32,

    /// Transport retries allowed per fetch.
    pub fetch_retries: u32,
}

impl SearchState {
    /// Creates the state for a freshly mounted controller.
    ///
    /// `page` is the eagerly fetched first page for `initial_query`. Raw, settled
    /// and results queries all start out as `initial_query`.
    #[must_use]
    pub fn new(initial_query: impl Into<String>, page: ResultPage, page_size: u32, fetch_retries: u32) -> Self {
        let query = initial_query.into();
        let target = Target {
            query: query.clone(),
            page: page.current_page,
        };

        Self {
            raw_query: query.clone(),
            settled_query: query.clone(),
            results_query: query,
            page,
            target,
            generation: Generation::default(),
            phase: Phase::Idle,
            last_error: None,
            page_size,
            fetch_retries,
        }
    }

    /// Page count of the displayed results.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.page.total_pages(self.page_size)
    }

    /// Whether a fetch for the latest generation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Fetching
    }

    /// Issues a new generation for `(query, page)` and makes it the target.
    ///
    /// Every fetch issued before this call becomes stale.
    pub fn begin_fetch(&mut self, query: impl Into<String>, page: u32) -> FetchRequest {
        let query = query.into();
        self.generation = self.generation.next();
        self.target = Target {
            query: query.clone(),
            page,
        };
        self.phase = Phase::Fetching;

        FetchRequest::new(
            self.generation,
            query,
            page,
            page::start_index(page, self.page_size),
        )
    }

    /// Whether `request` belongs to the latest generation.
    #[must_use]
    pub fn is_current(&self, request: &FetchRequest) -> bool {
        request.generation == self.generation
    }

    /// Replaces the displayed page with a successful, current result.
    pub fn apply_page(&mut self, request: &FetchRequest, page: ResultPage) {
        self.results_query.clone_from(&request.query);
        self.target = Target {
            query: request.query.clone(),
            page: page.current_page,
        };
        self.page = page;
        self.phase = Phase::Idle;
        self.last_error = None;
    }

    /// Records a terminal failure of the current generation.
    ///
    /// The displayed page stays untouched and the target falls back to it, so
    /// asking for the same query or page again issues a new fetch.
    pub fn fail(&mut self, error: &BookshelfError) {
        self.target = Target {
            query: self.results_query.clone(),
            page: self.page.current_page,
        };
        self.phase = Phase::Idle;
        self.last_error = Some(error.to_string());
    }

    /// Computes a renderable view model from the current state.
    ///
    /// `favorites` is a snapshot of the favorites set, read once per render.
    #[must_use]
    pub fn compute_viewmodel(&self, favorites: &HashSet<String>) -> SearchViewModel {
        let _span = tracing::debug_span!("compute_viewmodel",
            items = self.page.items.len(),
            favorites = favorites.len()
        ).entered();

        let matcher = if self.results_query.trim().is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let cards = self
            .page
            .items
            .iter()
            .map(|book| self.compute_card(book, favorites, matcher.as_ref()))
            .collect();

        let empty_state = self.page.items.is_empty().then(|| EmptyState {
            message: "No books found".to_string(),
            subtitle: format!("Nothing matched \"{}\"", self.results_query),
        });

        SearchViewModel {
            query: self.raw_query.clone(),
            results_query: self.results_query.clone(),
            cards,
            pagination: PaginationInfo {
                current_page: self.page.current_page,
                total_pages: self.total_pages(),
                total_items: self.page.total_items,
            },
            is_loading: self.is_loading(),
            error: self.last_error.clone(),
            empty_state,
        }
    }

    fn compute_card(&self, book: &BookSummary, favorites: &HashSet<String>, matcher: Option<&SkimMatcherV2>) -> BookCard {
        let title = book.title.clone().unwrap_or_else(|| UNTITLED.to_string());

        let authors = if book.authors.is_empty() {
            EMPTY_FIELD.to_string()
        } else {
            book.authors.join(", ")
        };

        let highlight_ranges = match (matcher, &book.title) {
            (Some(m), Some(t)) => self.compute_highlight_ranges(t, m),
            _ => vec![],
        };

        BookCard {
            id: book.id.clone(),
            title,
            authors,
            excerpt: excerpt(&book.description),
            thumbnail: book.thumbnail.clone(),
            preview_link: book.preview_link.clone(),
            is_favorite: favorites.contains(&book.id),
            highlight_ranges,
        }
    }

    /// Char ranges of `text` matched by any whitespace token of the results query.
    ///
    /// Each token is matched on its own so a multi-word query still highlights
    /// the words that do appear. Overlapping and adjacent matches are merged.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let indices: BTreeSet<usize> = self
            .results_query
            .split_whitespace()
            .map(str::to_lowercase)
            .filter_map(|token| matcher.fuzzy_indices(text, &token))
            .flat_map(|(_score, idx)| idx)
            .collect();

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }
}

/// Shortens a description for card display.
///
/// Descriptions over [`EXCERPT_THRESHOLD`] characters are cut to
/// [`EXCERPT_LENGTH`] characters and suffixed with `...`.
fn excerpt(description: &str) -> String {
    if description.is_empty() {
        return EMPTY_FIELD.to_string();
    }

    if description.chars().count() > EXCERPT_THRESHOLD {
        let head: String = description.chars().take(EXCERPT_LENGTH).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
