use std::sync::Arc;

use axum::extract::ws::Message;
use chrono::Utc;
use serde_json::json;
use tokio::sync::{mpsc, RwLock};
use v3_core::job::Job;
use v3_core::job_events::MSG_TYPE_GALLERY_RENDER;
use v3_core::types::Timestamp;

use super::render::render_gallery;
use super::state::{GalleryState, StatusFilter};
use super::view::build_view;
use crate::ws::WsManager;

struct Inner {
    state: GalleryState,
    /// Markup from the last render, as sent to browsers.
    html: String,
    last_snapshot_at: Option<Timestamp>,
}

/// Owns the gallery state and keeps connected browsers in sync with it.
///
/// Every change re-renders the whole gallery and broadcasts the markup.
/// The broadcast happens under the same lock as the state change, so a
/// browser never receives renders out of order.
pub struct Gallery {
    inner: RwLock<Inner>,
    ws_manager: Arc<WsManager>,
}

impl Gallery {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        let state = GalleryState::new();
        let html = render_gallery(&build_view(&state, Utc::now()));
        Self {
            inner: RwLock::new(Inner {
                state,
                html,
                last_snapshot_at: None,
            }),
            ws_manager,
        }
    }

    /// Replace the job list with a new snapshot, re-render and broadcast.
    ///
    /// Returns the new markup.
    pub async fn apply_snapshot(&self, jobs: Vec<Job>) -> String {
        let mut inner = self.inner.write().await;
        inner.state.apply_snapshot(jobs);
        inner.last_snapshot_at = Some(Utc::now());
        self.rerender(&mut inner).await
    }

    /// Change which statuses are shown, re-render and broadcast.
    pub async fn set_filter(&self, filter: StatusFilter) -> String {
        let mut inner = self.inner.write().await;
        inner.state.filter = filter;
        self.rerender(&mut inner).await
    }

    /// Register a browser connection and queue the current markup as its
    /// first message.
    pub async fn connect(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let inner = self.inner.read().await;
        let rx = self.ws_manager.add(conn_id.clone()).await;
        self.ws_manager
            .send_to(&conn_id, render_message(&inner.html))
            .await;
        rx
    }

    pub async fn remove_connection(&self, conn_id: &str) {
        self.ws_manager.remove(conn_id).await;
    }

    /// Markup from the last render.
    pub async fn html(&self) -> String {
        self.inner.read().await.html.clone()
    }

    /// Render the current state now, so relative times are up to date.
    pub async fn render_now(&self) -> String {
        let inner = self.inner.read().await;
        render_gallery(&build_view(&inner.state, Utc::now()))
    }

    pub async fn filter(&self) -> StatusFilter {
        self.inner.read().await.state.filter
    }

    /// Number of jobs in the last snapshot, before filtering.
    pub async fn job_count(&self) -> usize {
        self.inner.read().await.state.jobs.len()
    }

    pub async fn last_snapshot_at(&self) -> Option<Timestamp> {
        self.inner.read().await.last_snapshot_at
    }

    async fn rerender(&self, inner: &mut Inner) -> String {
        let html = render_gallery(&build_view(&inner.state, Utc::now()));
        inner.html.clone_from(&html);
        self.ws_manager.broadcast(render_message(&html)).await;
        let clients = self.ws_manager.connection_count().await;
        tracing::debug!(jobs = inner.state.jobs.len(), clients, "Gallery re-rendered");
        html
    }
}

/// The text frame carrying freshly rendered gallery markup.
pub fn render_message(html: &str) -> Message {
    let payload = json!({
        "type": MSG_TYPE_GALLERY_RENDER,
        "html": html,
    });
    Message::Text(payload.to_string().into())
}
