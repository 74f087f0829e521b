//! Tests for the polling live-query subscription.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use v3_core::job::{JobStatus, JOBS_COLLECTION};
use v3_store::memory::MemoryStore;
use v3_store::{subscribe, Document, Query};

const POLL: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(2);

fn doc(id: &str, status: &str, created_at: &str) -> Document {
    Document::new(id, json!({ "status": status, "createdAt": created_at }))
}

#[tokio::test]
async fn first_snapshot_is_emitted_even_when_empty() {
    let store = Arc::new(MemoryStore::new());
    let cancel = CancellationToken::new();
    let mut rx = subscribe(store, Query::recent_jobs(50), POLL, cancel.clone());

    let snapshot = tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("snapshot within timeout")
        .expect("channel open")
        .expect("query ok");

    assert!(snapshot.is_empty());
    cancel.cancel();
}

#[tokio::test]
async fn unchanged_results_are_not_re_emitted() {
    let store = Arc::new(MemoryStore::new());
    store
        .upsert(JOBS_COLLECTION, doc("a", "pending", "2024-01-01T00:00:00Z"))
        .await;
    let cancel = CancellationToken::new();
    let mut rx = subscribe(store.clone(), Query::recent_jobs(50), POLL, cancel.clone());

    let first = rx.recv().await.unwrap().unwrap();
    assert_eq!(first.len(), 1);

    // Several poll intervals pass without changes.
    let quiet = tokio::time::timeout(POLL * 10, rx.recv()).await;
    assert!(quiet.is_err(), "no event expected for identical results");

    store
        .upsert(JOBS_COLLECTION, doc("a", "processing", "2024-01-01T00:00:00Z"))
        .await;
    let second = tokio::time::timeout(WAIT, rx.recv())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(second.jobs()[0].status, JobStatus::Processing);

    cancel.cancel();
}

#[tokio::test]
async fn errors_are_emitted_and_polling_continues() {
    let store = Arc::new(MemoryStore::new());
    store.set_unavailable(Some("offline".into())).await;
    let cancel = CancellationToken::new();
    let mut rx = subscribe(store.clone(), Query::recent_jobs(50), POLL, cancel.clone());

    let event = tokio::time::timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(event.is_err());

    store.set_unavailable(None).await;
    loop {
        let event = tokio::time::timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        if let Ok(snapshot) = event {
            assert!(snapshot.is_empty());
            break;
        }
    }

    cancel.cancel();
}

#[tokio::test]
async fn cancel_closes_the_stream() {
    let store = Arc::new(MemoryStore::new());
    let cancel = CancellationToken::new();
    let mut rx = subscribe(store, Query::recent_jobs(50), POLL, cancel.clone());

    let _ = rx.recv().await;
    cancel.cancel();

    let closed = tokio::time::timeout(WAIT, async { while rx.recv().await.is_some() {} }).await;
    assert!(closed.is_ok(), "stream should end after cancel");
}
