//! Live queries.
//!
//! The REST surface has no streaming listen, so a subscription re-runs the
//! query on a fixed interval and emits a [`Snapshot`] whenever the result
//! differs from the last one emitted. The first successful result is
//! always emitted, even when empty. Query failures are emitted as errors
//! and polling continues.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use v3_core::job::Job;
use v3_core::types::Timestamp;

use crate::document::Document;
use crate::error::StoreError;
use crate::query::Query;
use crate::store::DocumentStore;

/// Buffered events before the poller waits on the consumer.
const CHANNEL_CAPACITY: usize = 16;

/// The full result set of a live query at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub documents: Vec<Document>,
    pub read_at: Timestamp,
}

impl Snapshot {
    pub fn jobs(&self) -> Vec<Job> {
        self.documents.iter().map(Document::to_job).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub type SnapshotEvent = Result<Snapshot, StoreError>;

/// Start a live query.
///
/// Returns the receiving end of the event stream. The polling task stops
/// when `cancel` fires or the receiver is dropped.
pub fn subscribe(
    store: Arc<dyn DocumentStore>,
    query: Query,
    poll_interval: Duration,
    cancel: CancellationToken,
) -> mpsc::Receiver<SnapshotEvent> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last: Option<Vec<Document>> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(collection = %query.collection, "Subscription cancelled");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let event = match store.run_query(&query).await {
                Ok(documents) if last.as_ref() == Some(&documents) => continue,
                Ok(documents) => {
                    last = Some(documents.clone());
                    Ok(Snapshot {
                        documents,
                        read_at: Utc::now(),
                    })
                }
                Err(e) => Err(e),
            };

            if tx.send(event).await.is_err() {
                tracing::debug!(collection = %query.collection, "Subscriber dropped");
                break;
            }
        }
    });

    rx
}
