//! Spawned fetch tasks.
//!
//! Each catalog search runs on its own tokio task so the controller keeps
//! accepting input while requests are in flight. Tasks are never aborted: a
//! superseded request runs to completion and the controller drops its result on
//! arrival. The task inherits the caller's tracing span so exported traces link
//! the request to the intent that caused it.

use crate::catalog::CatalogClient;
use crate::worker::{FetchCompletion, FetchRequest};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Runs one request against `client` and returns its completion.
pub async fn run_fetch(client: &dyn CatalogClient, request: FetchRequest) -> FetchCompletion {
    tracing::debug!(
        generation = %request.generation,
        query = %request.query,
        page = request.page,
        attempt = request.attempt,
        "fetch started"
    );

    let result = client.search(&request.query, request.start_index).await;

    match &result {
        Ok(page) => tracing::debug!(items = page.items.len(), "fetch succeeded"),
        Err(e) => tracing::debug!(error = %e, "fetch failed"),
    }

    FetchCompletion { request, result }
}

/// Spawns `request` on the current runtime and reports the completion on `tx`.
///
/// If the receiver is gone (the controller was torn down), the completion is
/// discarded silently.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_fetch(
    client: Arc<dyn CatalogClient>,
    request: FetchRequest,
    tx: UnboundedSender<FetchCompletion>,
) -> JoinHandle<()> {
    let span = tracing::debug_span!("fetch",
        generation = %request.generation,
        page = request.page
    );

    tokio::spawn(
        async move {
            let completion = run_fetch(client.as_ref(), request).await;
            if tx.send(completion).is_err() {
                tracing::debug!("controller gone, dropping fetch completion");
            }
        }
        .instrument(span),
    )
}
