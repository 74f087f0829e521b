pub mod gallery;
pub mod health;
pub mod page;
pub mod test_jobs;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                 WebSocket (gallery renders)
/// /gallery            current gallery markup (GET)
/// /gallery/filter     set status filter (PUT)
/// /test-jobs          create a test job (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/gallery", get(gallery::get_gallery))
        .route("/gallery/filter", put(gallery::set_filter))
        .route("/test-jobs", post(test_jobs::create))
}
