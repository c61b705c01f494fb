//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the rendering layer (the binary, or any other
//! front end) and the catalog, storage and worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Intents → Events → handle_event → State Mutations → Actions → Side Effects
//!                         ↑                                        ↓
//!                         └──── Debounce emissions / Fetch completions ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Runtime glue that executes actions and collects events
//! - [`debounce`]: Cancellable last-write-wins timer
//! - [`handler`]: Event processing and state transitions
//! - [`state`]: Search state container and view model computation

pub mod actions;
pub mod controller;
pub mod debounce;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use controller::{ControllerOptions, SearchController};
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use state::{Phase, SearchState, Target};
