//! Entity-store lifecycle: initial-load retry with backoff, terminal
//! failure with manual retry, refresh failures keeping the previous
//! collection, and cancellation on view teardown.

use riskboard::store::{CancelToken, EntityStore, LoadState, ViewGuard};

mod common;
use common::{fair_backend, fair_risk, init_logging, test_config};

#[tokio::test]
async fn initial_load_replaces_the_collection() {
    init_logging();
    let backend = fair_backend(vec![fair_risk(1, "Phishing", 100.0)]);
    let mut store = EntityStore::new(&test_config());

    assert_eq!(*store.state(), LoadState::Idle);
    store.load(&backend, &CancelToken::detached()).await.unwrap();
    assert!(store.is_ready());
    assert_eq!(store.items().len(), 1);
    assert_eq!(backend.fetches(), 1);
}

#[tokio::test]
async fn initial_load_retries_through_transient_failures() {
    init_logging();
    let backend = fair_backend(vec![fair_risk(1, "Phishing", 100.0)]).failing_first(2);
    let mut store = EntityStore::new(&test_config());

    store.load(&backend, &CancelToken::detached()).await.unwrap();
    assert!(store.is_ready());
    assert_eq!(backend.fetches(), 3);
}

#[tokio::test]
async fn exhausted_retries_surface_a_terminal_error() {
    init_logging();
    let backend = fair_backend(vec![fair_risk(1, "Phishing", 100.0)]).failing_first(5);
    let mut store = EntityStore::new(&test_config());

    let result = store.load(&backend, &CancelToken::detached()).await;
    assert!(result.is_err());
    assert!(matches!(store.state(), LoadState::Failed { .. }));
    assert_eq!(backend.fetches(), 3);
    assert!(store.items().is_empty());

    // Manual retry path: Failed → Loading → Ready
    store.load(&backend, &CancelToken::detached()).await.unwrap();
    assert!(store.is_ready());
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_collection() {
    init_logging();
    let backend = fair_backend(vec![fair_risk(1, "Phishing", 100.0)]);
    let mut store = EntityStore::new(&test_config());
    store.load(&backend, &CancelToken::detached()).await.unwrap();

    // Refreshes fail fast: one attempt, no retry schedule
    let backend = backend.failing_first(1);
    let result = store.load(&backend, &CancelToken::detached()).await;
    assert!(result.is_err());
    assert!(matches!(store.state(), LoadState::Failed { .. }));
    assert_eq!(store.items().len(), 1, "previous collection must survive");
    assert_eq!(backend.fetches(), 2);
}

#[tokio::test]
async fn cancelled_load_never_touches_state() {
    init_logging();
    let backend = fair_backend(vec![fair_risk(1, "Phishing", 100.0)]);
    let mut store = EntityStore::new(&test_config());

    let (guard, token) = ViewGuard::new();
    guard.cancel();
    let result = store.load(&backend, &token).await;
    assert!(result.is_err());
    assert!(store.items().is_empty());
    assert_eq!(*store.state(), LoadState::Idle);
    assert_eq!(backend.fetches(), 0, "no request after teardown");
}

#[tokio::test]
async fn dropping_the_guard_cancels_pending_retries() {
    init_logging();
    // Every fetch fails, so the store would normally sleep between retries
    let backend = fair_backend(vec![]).failing_first(usize::MAX);
    let mut config = test_config();
    config.retry_base = std::time::Duration::from_secs(60);
    let mut store = EntityStore::new(&config);

    let (guard, token) = ViewGuard::new();
    let load = store.load(&backend, &token);
    tokio::pin!(load);

    // Poll once so the first attempt fails and the backoff sleep starts
    tokio::select! {
        _ = &mut load => panic!("load should still be waiting out the backoff"),
        _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {}
    }

    drop(guard);
    let result = load.await;
    assert!(matches!(result, Err(riskboard::AppError::Cancelled)));
    assert_eq!(backend.fetches(), 1);
}
