use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use v3_store::{subscribe, DocumentStore, Query};

use super::controller::Gallery;

/// Feed the gallery from a live query on the newest `limit` jobs.
///
/// Snapshots are applied one at a time from this task. A failed poll is
/// logged and the last rendered gallery stays on screen. Returns once
/// `cancel` fires.
pub async fn run_listener(
    gallery: Arc<Gallery>,
    store: Arc<dyn DocumentStore>,
    limit: u32,
    poll_interval: Duration,
    cancel: CancellationToken,
) {
    let mut events = subscribe(store, Query::recent_jobs(limit), poll_interval, cancel);
    tracing::info!(limit, ?poll_interval, "Listening for job updates");

    while let Some(event) = events.recv().await {
        match event {
            Ok(snapshot) => {
                tracing::info!(count = snapshot.len(), "Received jobs");
                gallery.apply_snapshot(snapshot.jobs()).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error listening to jobs");
            }
        }
    }

    tracing::info!("Job listener stopped");
}
