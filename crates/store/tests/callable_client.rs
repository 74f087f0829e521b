//! Integration tests for the callable-function client.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use v3_core::test_job::CreateJobRequest;
use v3_store::functions::CallableClient;
use v3_store::{JobProcedures, StoreError};

async fn echo_job_id(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let ok = body["data"]["type"] == "video"
        && body["data"]["format"] == "16:9"
        && body["data"]["prompt"] == "A beautiful nature timelapse";

    if ok {
        (StatusCode::OK, Json(json!({ "result": { "jobId": "job-42" } })))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "status": "INVALID_ARGUMENT", "message": body.to_string() } })),
        )
    }
}

#[tokio::test]
async fn create_test_job_wraps_input_in_data_and_unwraps_result() {
    let app = Router::new().route("/createTestJob", post(echo_job_id));
    let base = common::spawn_server(app).await;
    let client = CallableClient::new(base);

    let resp = client
        .create_test_job(&CreateJobRequest::test_job("video"))
        .await
        .expect("call should succeed");

    assert_eq!(resp.job_id, "job-42");
}

#[tokio::test]
async fn structured_error_maps_to_procedure_error() {
    let app = Router::new().route(
        "/createTestJob",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "status": "INVALID_ARGUMENT", "message": "bad type" } })),
            )
        }),
    );
    let base = common::spawn_server(app).await;
    let client = CallableClient::new(base);

    let err = client
        .create_test_job(&CreateJobRequest::test_job("image"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "bad type");
    assert_matches!(
        err,
        StoreError::Procedure { ref status, ref message }
            if status == "INVALID_ARGUMENT" && message == "bad type"
    );
}

#[tokio::test]
async fn unstructured_error_maps_to_api_error() {
    let app = Router::new().route(
        "/createTestJob",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = common::spawn_server(app).await;
    let client = CallableClient::new(base);

    let err = client
        .create_test_job(&CreateJobRequest::test_job("image"))
        .await
        .unwrap_err();

    assert_matches!(err, StoreError::Api { status: 502, .. });
}

#[tokio::test]
async fn missing_result_is_decode_error() {
    let app = Router::new().route(
        "/createTestJob",
        post(|| async { Json(json!({ "ok": true })) }),
    );
    let base = common::spawn_server(app).await;
    // Trailing slash is trimmed.
    let client = CallableClient::new(format!("{base}/"));

    let err = client
        .create_test_job(&CreateJobRequest::test_job("image"))
        .await
        .unwrap_err();

    assert_matches!(err, StoreError::Decode(_));
}
