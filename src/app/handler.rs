//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`SearchState`] changes. It never
//! performs I/O: timers and fetches are returned as [`Action`]s for the
//! controller to execute.
//!
//! # Event Types
//!
//! - **Input**: `QueryChanged` for every keystroke, `PageRequested` for pager clicks
//! - **Timer**: `QuerySettled` when the debounce window elapses
//! - **Worker**: `FetchCompleted` with the outcome of a spawned fetch
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, Action, Event, SearchState};
//! use bookshelf::ResultPage;
//!
//! let mut state = SearchState::new("example books", ResultPage::empty(), 6, 0);
//! let (render, actions) = handle_event(&mut state, Event::QueryChanged("dogs".into()))?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::Debounce("dogs".into())]);
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

use crate::app::{Action, SearchState};
use crate::domain::error::Result;
use crate::domain::page;
use crate::worker::FetchCompletion;

/// Inputs to the search state machine.
#[derive(Debug)]
pub enum Event {
    /// The search box text changed.
    QueryChanged(String),

    /// The debouncer emitted a settled query.
    QuerySettled(String),

    /// The user asked for a page. Any integer is accepted and clamped.
    PageRequested(i64),

    /// A spawned fetch finished.
    FetchCompleted(FetchCompletion),
}

/// Processes one event, mutating state and returning actions to execute.
///
/// Returns `(needs_render, actions)`.
///
/// # Errors
///
/// Returns the catalog error when a fetch of the latest generation fails for
/// good (after any retries). The state has already been updated by then: the
/// displayed page is kept, the target reverts to it and `last_error` is set.
pub fn handle_event(state: &mut SearchState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", generation = %state.generation).entered();

    match event {
        Event::QueryChanged(text) => {
            if text == state.raw_query {
                return Ok((false, vec![]));
            }
            tracing::trace!(query = %text, "raw query changed");
            state.raw_query.clone_from(&text);
            Ok((true, vec![Action::Debounce(text)]))
        }

        Event::QuerySettled(text) => {
            // A blank box is not a query; the previous settled query stays active.
            if text.trim().is_empty() {
                tracing::debug!("settled query is blank, ignoring");
                return Ok((false, vec![]));
            }

            state.settled_query.clone_from(&text);
            if text == state.target.query {
                tracing::debug!(query = %text, "settled query already targeted");
                return Ok((false, vec![]));
            }

            let request = state.begin_fetch(text, 1);
            tracing::debug!(
                generation = %request.generation,
                query = %request.query,
                "query settled, fetching first page"
            );
            Ok((true, vec![Action::Fetch(request)]))
        }

        Event::PageRequested(requested) => {
            // Page count of a pending query is unknown until its first page lands.
            if state.target.query != state.results_query {
                tracing::debug!(
                    requested = requested,
                    pending = %state.target.query,
                    "new query still loading, ignoring page request"
                );
                return Ok((false, vec![]));
            }

            let page = page::clamp_page(requested, state.total_pages());
            if page == state.target.page {
                tracing::debug!(requested = requested, page = page, "page already targeted");
                return Ok((false, vec![]));
            }

            let query = state.target.query.clone();
            let request = state.begin_fetch(query, page);
            tracing::debug!(
                generation = %request.generation,
                requested = requested,
                page = page,
                start_index = request.start_index,
                "page requested"
            );
            Ok((true, vec![Action::Fetch(request)]))
        }

        Event::FetchCompleted(completion) => handle_completion(state, completion),
    }
}

fn handle_completion(state: &mut SearchState, completion: FetchCompletion) -> Result<(bool, Vec<Action>)> {
    let FetchCompletion { request, result } = completion;

    if !state.is_current(&request) {
        tracing::debug!(
            stale = %request.generation,
            latest = %state.generation,
            query = %request.query,
            "discarding stale fetch completion"
        );
        return Ok((false, vec![]));
    }

    match result {
        Ok(page) => {
            tracing::debug!(
                query = %request.query,
                page = page.current_page,
                items = page.items.len(),
                total_items = page.total_items,
                "applying result page"
            );
            state.apply_page(&request, page);
            Ok((true, vec![]))
        }
        Err(e) if e.is_retryable() && request.attempt < state.fetch_retries => {
            tracing::warn!(
                error = %e,
                attempt = request.attempt + 1,
                max_retries = state.fetch_retries,
                "fetch failed, retrying"
            );
            Ok((false, vec![Action::Fetch(request.retry())]))
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                query = %request.query,
                page = request.page,
                "fetch failed, keeping last good page"
            );
            state.fail(&e);
            Err(e)
        }
    }
}
