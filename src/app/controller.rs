//! The search controller: runtime glue around the event handler.
//!
//! [`SearchController`] owns the [`SearchState`], the debounce timer, the
//! favorites store and the catalog client. Intents from the rendering layer go
//! through [`handle_event`]; the resulting actions are executed here. Timer
//! emissions and fetch completions come back as [`Event`]s from
//! [`SearchController::next_event`].
//!
//! # Driving the controller
//!
//! ```rust,no_run
//! use bookshelf::app::{ControllerOptions, SearchController};
//! use bookshelf::catalog::GoogleBooksClient;
//! use bookshelf::storage::{FavoritesStore, MemoryStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo() -> bookshelf::Result<()> {
//! let client = GoogleBooksClient::new(bookshelf::catalog::DEFAULT_ENDPOINT, 6, Duration::from_secs(30))?;
//! let favorites = FavoritesStore::new(Box::new(MemoryStore::new()), "favoriteBooks");
//!
//! let mut controller = SearchController::mount(Arc::new(client), favorites, ControllerOptions::default()).await?;
//! controller.set_query("dogs")?;
//! controller.run_until_idle().await?;
//! println!("{} results for dogs", controller.total_items());
//! # Ok(())
//! # }
//! ```

use crate::app::debounce::Debouncer;
use crate::app::{handle_event, Action, Event, SearchState};
use crate::catalog::CatalogClient;
use crate::domain::error::Result;
use crate::domain::BookSummary;
use crate::storage::FavoritesStore;
use crate::ui::viewmodel::SearchViewModel;
use crate::worker::{spawn_fetch, FetchCompletion};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;

/// Settings the controller needs at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Query fetched before `mount` returns.
    pub initial_query: String,

    /// Debounce quiet period.
    pub debounce: Duration,

    /// Transport retries per fetch.
    pub fetch_retries: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial_query: "example books".to_string(),
            debounce: Duration::from_millis(500),
            fetch_retries: 0,
        }
    }
}

/// Search, pagination and favorites controller.
///
/// Driven from a single task. Fetches run on spawned tasks and report back over
/// a channel; their completions are applied one at a time by [`apply`].
/// Dropping the controller cancels a pending debounce emission. In-flight
/// fetches finish on their own and their results are discarded.
///
/// [`apply`]: SearchController::apply
pub struct SearchController {
    state: SearchState,
    debouncer: Debouncer<String>,
    favorites: FavoritesStore,
    client: Arc<dyn CatalogClient>,
    completions_tx: UnboundedSender<FetchCompletion>,
    completions_rx: UnboundedReceiver<FetchCompletion>,
    in_flight: usize,
}

impl SearchController {
    /// Fetches the first page of `options.initial_query` and returns a ready
    /// controller.
    ///
    /// Transport failures are retried up to `options.fetch_retries` times.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the initial page cannot be loaded.
    pub async fn mount(
        client: Arc<dyn CatalogClient>,
        favorites: FavoritesStore,
        options: ControllerOptions,
    ) -> Result<Self> {
        let page_size = client.page_size();
        let span = tracing::info_span!("controller_mount",
            initial_query = %options.initial_query,
            page_size = page_size
        );

        let page = async {
            let mut attempt = 0;
            loop {
                match client.search(&options.initial_query, 0).await {
                    Ok(page) => break Ok(page),
                    Err(e) if e.is_retryable() && attempt < options.fetch_retries => {
                        attempt += 1;
                        tracing::warn!(error = %e, attempt = attempt, "initial load failed, retrying");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "initial load failed");
                        break Err(e);
                    }
                }
            }
        }
        .instrument(span)
        .await?;

        tracing::info!(
            total_items = page.total_items,
            items = page.items.len(),
            "controller mounted"
        );

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state: SearchState::new(options.initial_query, page, page_size, options.fetch_retries),
            debouncer: Debouncer::new(options.debounce),
            favorites,
            client,
            completions_tx,
            completions_rx,
            in_flight: 0,
        })
    }

    /// Updates the raw query and restarts the debounce window.
    ///
    /// Returns whether the view needs re-rendering.
    ///
    /// # Errors
    ///
    /// Does not fail today; the signature matches [`apply`](Self::apply).
    pub fn set_query(&mut self, text: impl Into<String>) -> Result<bool> {
        self.apply(Event::QueryChanged(text.into()))
    }

    /// Requests a page of the current query, bypassing the debouncer.
    ///
    /// `page` is clamped to `[1, total_pages]`. Ignored while a new query's first
    /// page is still loading.
    ///
    /// # Errors
    ///
    /// Does not fail today; the signature matches [`apply`](Self::apply).
    pub fn set_page(&mut self, page: i64) -> Result<bool> {
        self.apply(Event::PageRequested(page))
    }

    /// Flips favorite membership of `id` and returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.favorites.toggle(id)
    }

    /// Whether `id` is a favorite, read from storage.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// All favorite ids, read from storage.
    #[must_use]
    pub fn favorites(&self) -> HashSet<String> {
        self.favorites.all()
    }

    /// Favorite ids in the order they were added.
    #[must_use]
    pub fn favorites_ordered(&self) -> Vec<String> {
        self.favorites.ordered()
    }

    /// Items of the displayed page, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[BookSummary] {
        &self.state.page.items
    }

    /// Match count of the displayed results.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.page.total_items
    }

    /// 1-based page being displayed.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.page.current_page
    }

    /// Page count of the displayed results.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.state.total_pages()
    }

    #[must_use]
    pub fn raw_query(&self) -> &str {
        &self.state.raw_query
    }

    #[must_use]
    pub fn settled_query(&self) -> &str {
        &self.state.settled_query
    }

    /// Query that produced the displayed page.
    #[must_use]
    pub fn results_query(&self) -> &str {
        &self.state.results_query
    }

    /// Message of the last terminal fetch failure, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    /// Whether a fetch for the current target is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether nothing is pending: no debounce emission and no fetch task,
    /// stale ones included.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.debouncer.is_pending() && self.in_flight == 0
    }

    /// Read-only view of the whole state.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Computes the view model, reading the favorites set once.
    #[must_use]
    pub fn view_model(&self) -> SearchViewModel {
        self.state.compute_viewmodel(&self.favorites.all())
    }

    /// Waits for the next timer emission or fetch completion.
    ///
    /// Never completes while the controller is idle. Cancel-safe, so it can be
    /// raced against other input in `tokio::select!`.
    pub async fn next_event(&mut self) -> Event {
        let event = tokio::select! {
            query = self.debouncer.settled() => Event::QuerySettled(query),
            completion = recv_completion(&mut self.completions_rx) => Event::FetchCompleted(completion),
        };

        if matches!(event, Event::FetchCompleted(_)) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        event
    }

    /// Runs `event` through the handler and executes the resulting actions.
    ///
    /// Returns whether the view needs re-rendering.
    ///
    /// # Errors
    ///
    /// Returns the catalog error of a terminally failed fetch. The controller
    /// stays usable; the view should be re-rendered to show the error.
    pub fn apply(&mut self, event: Event) -> Result<bool> {
        let (needs_render, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(needs_render)
    }

    /// Waits for the next event and applies it.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn step(&mut self) -> Result<bool> {
        let event = self.next_event().await;
        self.apply(event)
    }

    /// Processes events until [`is_idle`](Self::is_idle).
    ///
    /// Failures do not stop processing.
    ///
    /// # Errors
    ///
    /// Returns the last fetch failure seen, if any.
    pub async fn run_until_idle(&mut self) -> Result<()> {
        let mut failure = None;
        while !self.is_idle() {
            if let Err(e) = self.step().await {
                failure = Some(e);
            }
        }
        failure.map_or(Ok(()), Err)
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Debounce(query) => self.debouncer.push(query),
            Action::Fetch(request) => {
                self.in_flight += 1;
                spawn_fetch(Arc::clone(&self.client), request, self.completions_tx.clone());
            }
        }
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &self.state)
            .field("debouncer", &self.debouncer)
            .field("favorites", &self.favorites)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

async fn recv_completion(rx: &mut UnboundedReceiver<FetchCompletion>) -> FetchCompletion {
    match rx.recv().await {
        Some(completion) => completion,
        None => std::future::pending().await,
    }
}
