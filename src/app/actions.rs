//! Actions representing side effects to be executed by the controller.
//!
//! The event handler never touches timers or the network itself. It returns a
//! `Vec<Action>` and the [`SearchController`](super::SearchController) executes
//! them in order, which keeps every state transition testable without a runtime.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::Action;
//! use bookshelf::worker::{FetchRequest, Generation};
//!
//! let actions = vec![
//!     Action::Debounce("dogs".to_string()),
//!     Action::Fetch(FetchRequest::new(Generation(1), "dogs", 1, 0)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::FetchRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Restarts the debounce timer with the latest raw query.
    Debounce(String),

    /// Spawns a catalog fetch.
    ///
    /// Issued immediately for page changes and after debounce for queries.
    Fetch(FetchRequest),
}
