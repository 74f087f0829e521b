use axum::extract::State;
use axum::response::Html;
use axum::{routing::get, Router};

use crate::gallery::render::render_page;
use crate::state::AppState;

/// GET / -- the gallery page with the current markup already in place.
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.gallery.render_now().await))
}

/// Mount the page route (root level).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
