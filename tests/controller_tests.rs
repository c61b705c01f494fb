//! End-to-end controller behavior against an in-process catalog.
//!
//! All tests run on a paused tokio clock, so debounce windows and response
//! delays are deterministic.

mod common;

use bookshelf::app::{ControllerOptions, SearchController};
use bookshelf::storage::{FavoritesStore, JsonFileStore, MemoryStore};
use bookshelf::BookshelfError;
use common::{Failure, StubCatalog};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

const INITIAL: &str = "example books";

fn memory_favorites() -> FavoritesStore {
    FavoritesStore::new(Box::new(MemoryStore::new()), "favoriteBooks")
}

async fn mount_with(stub: &Arc<StubCatalog>, favorites: FavoritesStore, fetch_retries: u32) -> SearchController {
    let options = ControllerOptions {
        fetch_retries,
        ..ControllerOptions::default()
    };
    SearchController::mount(stub.clone(), favorites, options)
        .await
        .expect("mount")
}

async fn mount(stub: &Arc<StubCatalog>) -> SearchController {
    mount_with(stub, memory_favorites(), 0).await
}

#[tokio::test(start_paused = true)]
async fn mount_loads_the_initial_page() {
    let stub = StubCatalog::new(6, 40);
    let controller = mount(&stub).await;

    assert_eq!(stub.calls(), vec![(INITIAL.to_string(), 0)]);
    assert_eq!(controller.items().len(), 6);
    assert_eq!(controller.total_items(), 40);
    assert_eq!(controller.total_pages(), 7);
    assert_eq!(controller.current_page(), 1);
    assert_eq!(controller.raw_query(), INITIAL);
    assert_eq!(controller.settled_query(), INITIAL);
    assert_eq!(controller.results_query(), INITIAL);
    assert!(controller.is_idle());
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn mount_propagates_initial_failure() {
    let stub = StubCatalog::new(6, 40);
    stub.fail_next(Failure::Transport);

    let outcome = SearchController::mount(stub.clone(), memory_favorites(), ControllerOptions::default()).await;

    assert!(matches!(outcome, Err(BookshelfError::Transport(_))));
}

#[tokio::test(start_paused = true)]
async fn mount_retries_transport_failures() {
    let stub = StubCatalog::new(6, 40);
    stub.fail_next(Failure::Transport);

    let controller = mount_with(&stub, memory_favorites(), 1).await;

    assert_eq!(stub.calls().len(), 2);
    assert_eq!(controller.items().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn keystrokes_inside_the_window_fetch_once() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;
    let start = Instant::now();

    assert!(controller.set_query("dogs").unwrap());
    sleep(Duration::from_millis(100)).await;
    assert!(controller.set_query("cats").unwrap());
    assert_eq!(controller.raw_query(), "cats");
    assert_eq!(controller.settled_query(), INITIAL);

    controller.run_until_idle().await.unwrap();

    assert_eq!(stub.calls_after_mount(), vec![("cats".to_string(), 0)]);
    assert!(start.elapsed() >= Duration::from_millis(600));
    assert_eq!(controller.settled_query(), "cats");
    assert_eq!(controller.results_query(), "cats");
    assert_eq!(controller.items()[0].id, "cats-0");
}

#[tokio::test(start_paused = true)]
async fn late_response_for_superseded_query_is_dropped() {
    let stub = StubCatalog::new(6, 40);
    stub.delay("A", Duration::from_secs(1));
    let mut controller = mount(&stub).await;

    controller.set_query("A").unwrap();
    controller.step().await.unwrap();
    assert!(controller.is_loading());

    controller.set_query("B").unwrap();
    controller.step().await.unwrap();

    controller.run_until_idle().await.unwrap();

    assert_eq!(
        stub.calls_after_mount(),
        vec![("A".to_string(), 0), ("B".to_string(), 0)]
    );
    assert_eq!(controller.results_query(), "B");
    assert!(controller.items().iter().all(|book| book.id.starts_with("B-")));
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn set_page_clamps_and_computes_offsets() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;

    controller.set_page(99).unwrap();
    controller.run_until_idle().await.unwrap();

    assert_eq!(stub.calls_after_mount(), vec![(INITIAL.to_string(), 36)]);
    assert_eq!(controller.current_page(), 7);
    assert_eq!(controller.items().len(), 4);

    assert!(!controller.set_page(7).unwrap());
    assert!(controller.is_idle());

    controller.set_page(-4).unwrap();
    controller.run_until_idle().await.unwrap();
    assert_eq!(controller.current_page(), 1);
    assert_eq!(stub.calls().last(), Some(&(INITIAL.to_string(), 0)));
}

#[tokio::test(start_paused = true)]
async fn page_change_bypasses_the_debouncer() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;
    let start = Instant::now();

    controller.set_page(2).unwrap();
    assert!(controller.is_loading());
    assert!(controller.view_model().is_loading);

    controller.run_until_idle().await.unwrap();

    assert!(start.elapsed() < Duration::from_millis(500));
    assert_eq!(controller.current_page(), 2);
    assert_eq!(controller.items()[0].id, "example books-6");
}

#[tokio::test(start_paused = true)]
async fn new_query_starts_on_page_one() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;

    controller.set_page(3).unwrap();
    controller.run_until_idle().await.unwrap();
    assert_eq!(controller.current_page(), 3);

    controller.set_query("cats").unwrap();
    controller.run_until_idle().await.unwrap();

    assert_eq!(controller.current_page(), 1);
    assert_eq!(stub.calls().last(), Some(&("cats".to_string(), 0)));
}

#[tokio::test(start_paused = true)]
async fn blank_or_unchanged_settled_query_does_not_fetch() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;

    controller.set_query("   ").unwrap();
    controller.run_until_idle().await.unwrap();
    assert_eq!(controller.settled_query(), INITIAL);

    controller.set_query("x").unwrap();
    controller.set_query(INITIAL).unwrap();
    controller.run_until_idle().await.unwrap();

    assert!(stub.calls_after_mount().is_empty());
    assert_eq!(controller.results_query(), INITIAL);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_box_does_not_orphan_a_pending_query() {
    let stub = StubCatalog::new(6, 40);
    stub.delay("cats", Duration::from_secs(1));
    let mut controller = mount(&stub).await;

    controller.set_query("cats").unwrap();
    controller.step().await.unwrap();
    assert!(controller.is_loading());

    controller.set_query("").unwrap();
    controller.step().await.unwrap();
    controller.run_until_idle().await.unwrap();

    assert_eq!(controller.settled_query(), "cats");
    assert_eq!(controller.results_query(), controller.settled_query());
    assert_eq!(controller.items()[0].id, "cats-0");
}

#[tokio::test(start_paused = true)]
async fn page_request_during_a_new_query_stays_in_range() {
    let stub = StubCatalog::new(6, 40);
    stub.total_for("cats", 3);
    stub.delay("cats", Duration::from_secs(1));
    let mut controller = mount(&stub).await;

    controller.set_query("cats").unwrap();
    controller.step().await.unwrap();
    assert!(!controller.set_page(5).unwrap());
    controller.run_until_idle().await.unwrap();

    assert_eq!(stub.calls_after_mount(), vec![("cats".to_string(), 0)]);
    assert_eq!(controller.results_query(), "cats");
    assert_eq!(controller.total_pages(), 1);
    assert!(controller.current_page() <= controller.total_pages());
    assert_eq!(controller.items().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_the_last_good_page() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;
    let before: Vec<String> = controller.items().iter().map(|b| b.id.clone()).collect();

    stub.fail_next(Failure::Transport);
    controller.set_page(2).unwrap();
    let err = controller.run_until_idle().await.unwrap_err();

    assert!(matches!(err, BookshelfError::Transport(_)));
    assert_eq!(controller.current_page(), 1);
    let after: Vec<String> = controller.items().iter().map(|b| b.id.clone()).collect();
    assert_eq!(after, before);
    assert!(controller.last_error().is_some_and(|e| e.contains("connection reset")));
    assert!(controller.view_model().error.is_some());

    controller.set_page(2).unwrap();
    controller.run_until_idle().await.unwrap();
    assert_eq!(controller.current_page(), 2);
    assert_eq!(controller.last_error(), None);
}

#[tokio::test(start_paused = true)]
async fn transport_failures_are_retried() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount_with(&stub, memory_favorites(), 2).await;

    stub.fail_next(Failure::Transport);
    stub.fail_next(Failure::Transport);
    controller.set_page(3).unwrap();
    controller.run_until_idle().await.unwrap();

    assert_eq!(stub.calls_after_mount(), vec![(INITIAL.to_string(), 12); 3]);
    assert_eq!(controller.current_page(), 3);
    assert_eq!(controller.last_error(), None);
}

#[tokio::test(start_paused = true)]
async fn decode_failures_are_not_retried() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount_with(&stub, memory_favorites(), 3).await;

    stub.fail_next(Failure::Decode);
    controller.set_page(2).unwrap();
    let err = controller.run_until_idle().await.unwrap_err();

    assert!(matches!(err, BookshelfError::Decode(_)));
    assert_eq!(stub.calls_after_mount().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_cancels_pending_debounce() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;

    controller.set_query("dogs").unwrap();
    assert!(!controller.is_idle());
    drop(controller);

    sleep(Duration::from_secs(2)).await;
    assert!(stub.calls_after_mount().is_empty());
}

#[tokio::test(start_paused = true)]
async fn favorites_flow_through_the_view_model() {
    let stub = StubCatalog::new(6, 40);
    let mut controller = mount(&stub).await;
    let id = controller.items()[0].id.clone();

    assert!(!controller.is_favorite(&id));
    assert!(controller.toggle_favorite(&id));
    assert!(controller.is_favorite(&id));
    assert!(controller.favorites().contains(&id));

    let vm = controller.view_model();
    assert!(vm.cards[0].is_favorite);
    assert!(!vm.cards[1].is_favorite);

    assert!(!controller.toggle_favorite(&id));
    assert!(controller.favorites().is_empty());
}

#[tokio::test(start_paused = true)]
async fn favorites_survive_a_remount() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let stub = StubCatalog::new(6, 40);

    let favorites = FavoritesStore::new(Box::new(JsonFileStore::new(path.clone()).unwrap()), "favoriteBooks");
    let mut controller = mount_with(&stub, favorites, 0).await;
    controller.toggle_favorite("zyTCAlFPjgYC");
    controller.toggle_favorite("abc");
    drop(controller);

    let favorites = FavoritesStore::new(Box::new(JsonFileStore::new(path).unwrap()), "favoriteBooks");
    let controller = mount_with(&stub, favorites, 0).await;

    assert!(controller.is_favorite("zyTCAlFPjgYC"));
    assert_eq!(controller.favorites_ordered(), vec!["zyTCAlFPjgYC", "abc"]);
}
