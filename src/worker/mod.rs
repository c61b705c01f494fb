//! Background catalog fetches.
//!
//! This module provides the message types exchanged between the controller and
//! its fetch tasks, and the task runner that performs catalog searches off the
//! controller's event loop.

pub mod handler;
pub mod messages;

pub use handler::{run_fetch, spawn_fetch};
pub use messages::{FetchCompletion, FetchRequest, Generation};
