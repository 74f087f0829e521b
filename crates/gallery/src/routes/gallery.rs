use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::gallery::StatusFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /gallery/filter`. A null or missing status shows all jobs.
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub status: Option<&'static str>,
}

/// GET /api/v1/gallery -- freshly rendered gallery markup.
pub async fn get_gallery(State(state): State<AppState>) -> Html<String> {
    Html(state.gallery.render_now().await)
}

/// PUT /api/v1/gallery/filter -- change the status filter for every viewer.
pub async fn set_filter(
    State(state): State<AppState>,
    Json(input): Json<FilterRequest>,
) -> AppResult<Json<DataResponse<FilterResponse>>> {
    let filter = StatusFilter::from_status(input.status.as_deref())?;
    state.gallery.set_filter(filter).await;
    tracing::info!(?filter, "Gallery filter changed");

    Ok(Json(DataResponse {
        data: FilterResponse {
            status: filter.status().map(|s| s.as_str()),
        },
    }))
}
