//! Shared test doubles for controller integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bookshelf::catalog::CatalogClient;
use bookshelf::{BookSummary, BookshelfError, Result, ResultPage};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Kind of failure a [`StubCatalog`] can inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Transport,
    Decode,
}

impl Failure {
    fn into_error(self) -> BookshelfError {
        match self {
            Self::Transport => BookshelfError::Transport("connection reset".into()),
            Self::Decode => BookshelfError::Decode("expected value".into()),
        }
    }
}

/// In-process catalog returning synthetic pages.
///
/// Every query matches `total_items` books unless overridden per query.
/// Item ids are `<query>-<offset>`.
/// Calls are recorded in order; per-query delays and queued failures let tests
/// control completion order and outcomes.
pub struct StubCatalog {
    page_size: u32,
    total_items: u64,
    calls: Mutex<Vec<(String, u32)>>,
    delays: Mutex<HashMap<String, Duration>>,
    totals: Mutex<HashMap<String, u64>>,
    failures: Mutex<VecDeque<Failure>>,
}

impl StubCatalog {
    pub fn new(page_size: u32, total_items: u64) -> Arc<Self> {
        Arc::new(Self {
            page_size,
            total_items,
            calls: Mutex::new(Vec::new()),
            delays: Mutex::new(HashMap::new()),
            totals: Mutex::new(HashMap::new()),
            failures: Mutex::new(VecDeque::new()),
        })
    }

    /// Responses for `query` take `delay` to arrive.
    pub fn delay(&self, query: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(query.to_string(), delay);
    }

    /// `query` matches `total_items` books instead of the default count.
    pub fn total_for(&self, query: &str, total_items: u64) {
        self.totals.lock().unwrap().insert(query.to_string(), total_items);
    }

    /// The next search fails with `failure`. Queued failures are used in order.
    pub fn fail_next(&self, failure: Failure) {
        self.failures.lock().unwrap().push_back(failure);
    }

    /// `(query, start_index)` of every search so far.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made after the initial mount fetch.
    pub fn calls_after_mount(&self) -> Vec<(String, u32)> {
        self.calls().into_iter().skip(1).collect()
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn search(&self, query: &str, start_index: u32) -> Result<ResultPage> {
        self.calls.lock().unwrap().push((query.to_string(), start_index));
        let delay = self.delays.lock().unwrap().get(query).copied();
        let failure = self.failures.lock().unwrap().pop_front();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = failure {
            return Err(failure.into_error());
        }

        let total_items = self.totals.lock().unwrap().get(query).copied().unwrap_or(self.total_items);
        let start = u64::from(start_index);
        let count = total_items.saturating_sub(start).min(u64::from(self.page_size));
        let items = (start..start + count)
            .map(|offset| BookSummary::new(format!("{query}-{offset}"), format!("{query} volume {offset}")))
            .collect();

        Ok(ResultPage {
            items,
            total_items,
            current_page: start_index / self.page_size + 1,
        })
    }
}
