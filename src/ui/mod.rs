//! Rendering layer types and the plain-text renderer.
//!
//! ```text
//! SearchState → compute_viewmodel → SearchViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable state
//! - [`renderer`]: Frame renderer writing to any `io::Write`
//! - [`helpers`]: Highlighting and styling utilities

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, RenderOptions};
pub use viewmodel::{BookCard, EmptyState, PaginationInfo, SearchViewModel};
