use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use v3_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` once a snapshot has arrived, `waiting` before that.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Jobs in the last snapshot.
    pub job_count: usize,
    pub last_snapshot_at: Option<Timestamp>,
}

/// GET /health -- returns service and live-query health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let last_snapshot_at = state.gallery.last_snapshot_at().await;

    let status = if last_snapshot_at.is_some() { "ok" } else { "waiting" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        job_count: state.gallery.job_count().await,
        last_snapshot_at,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
