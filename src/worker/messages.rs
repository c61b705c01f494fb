//! Fetch request and completion messages.
//!
//! This module defines the protocol between the controller and the spawned fetch
//! tasks. A request carries the generation it was issued under; the completion
//! echoes the whole request back so the controller can compare generations and,
//! if needed, re-issue the same request.

use crate::domain::error::Result;
use crate::domain::ResultPage;

/// Monotonically increasing tag assigned to each issued fetch.
///
/// A completion is applied only if its generation equals the controller's latest
/// generation. Retries reuse the generation of the request they repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog search to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Staleness tag.
    pub generation: Generation,

    /// Settled query text.
    pub query: String,

    /// 1-based page being requested.
    pub page: u32,

    /// Zero-based offset sent to the catalog.
    pub start_index: u32,

    /// 0 for the first try, incremented on each retry.
    pub attempt: u32,
}

impl FetchRequest {
    /// Creates a first-attempt request.
    pub fn new(generation: Generation, query: impl Into<String>, page: u32, start_index: u32) -> Self {
        Self {
            generation,
            query: query.into(),
            page,
            start_index,
            attempt: 0,
        }
    }

    /// The same request, one attempt later.
    #[must_use]
    pub fn retry(&self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self.clone()
        }
    }
}

/// Outcome of a fetch task, sent back to the controller.
#[derive(Debug)]
pub struct FetchCompletion {
    /// The request that produced this outcome.
    pub request: FetchRequest,

    /// The normalized page, or the catalog error.
    pub result: Result<ResultPage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_keeps_generation_and_target() {
        let request = FetchRequest::new(Generation(4), "dogs", 3, 12);
        let retried = request.retry().retry();

        assert_eq!(retried.generation, Generation(4));
        assert_eq!(retried.query, "dogs");
        assert_eq!(retried.page, 3);
        assert_eq!(retried.start_index, 12);
        assert_eq!(retried.attempt, 2);
    }

    #[test]
    fn generations_increase() {
        let first = Generation::default();
        assert!(first.next() > first);
        assert_eq!(first.next().next(), Generation(2));
    }
}
