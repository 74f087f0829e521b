//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use v3_core::job::{Job, JobStatus};

// ---------------------------------------------------------------------------
// Test: GET /health before any snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_waiting_before_first_snapshot() {
    let (app, _store) = common::build_test_app();
    let response = get(app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "waiting");
    assert!(json["version"].is_string());
    assert_eq!(json["job_count"], 0);
    assert!(json["last_snapshot_at"].is_null());
}

// ---------------------------------------------------------------------------
// Test: GET /health after a snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok_with_job_count_after_snapshot() {
    let (app, _store) = common::build_test_app();
    app.gallery
        .apply_snapshot(vec![
            Job::new("a", JobStatus::Pending),
            Job::new("b", JobStatus::Complete),
        ])
        .await;

    let json = body_json(get(app.router, "/health").await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["job_count"], 2);
    assert!(json["last_snapshot_at"].is_string());
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _store) = common::build_test_app();
    let response = get(app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _store) = common::build_test_app();
    let response = get(app.router, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
