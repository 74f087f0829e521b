#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use v3_core::test_job::{CreateJobRequest, CreateJobResponse};
use v3_store::memory::MemoryStore;
use v3_store::{JobProcedures, StoreError};

use v3_gallery::config::{GalleryConfig, ServerConfig};
use v3_gallery::gallery::Gallery;
use v3_gallery::router::build_app_router;
use v3_gallery::state::AppState;
use v3_gallery::ws::WsManager;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        gallery: GalleryConfig::default(),
    }
}

/// Everything a route test needs to drive and observe the server.
pub struct TestApp {
    pub router: Router,
    pub gallery: Arc<Gallery>,
    pub ws_manager: Arc<WsManager>,
}

/// Build the full application router around `procedures`.
pub fn build_test_app_with(procedures: Arc<dyn JobProcedures>) -> TestApp {
    let config = test_config();
    let ws_manager = Arc::new(WsManager::new());
    let gallery = Arc::new(Gallery::new(Arc::clone(&ws_manager)));

    let state = AppState {
        gallery: Arc::clone(&gallery),
        procedures,
    };

    TestApp {
        router: build_app_router(state, &config),
        gallery,
        ws_manager,
    }
}

/// Build the app against an in-memory store.
pub fn build_test_app() -> (TestApp, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build_test_app_with(store.clone()), store)
}

/// Procedures that always fail the way a rejected callable does.
pub struct RejectingProcedures;

#[async_trait]
impl JobProcedures for RejectingProcedures {
    async fn create_test_job(
        &self,
        _input: &CreateJobRequest,
    ) -> Result<CreateJobResponse, StoreError> {
        Err(StoreError::Procedure {
            status: "RESOURCE_EXHAUSTED".to_string(),
            message: "quota <exceeded>".to_string(),
        })
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
