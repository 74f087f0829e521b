use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use v3_core::test_job::validate_job_type;

use crate::error::AppResult;
use crate::gallery::create_test_job;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTestJobInput {
    #[serde(rename = "type")]
    pub job_type: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedTestJob {
    pub job_id: String,
}

/// POST /api/v1/test-jobs -- ask the platform for a test job.
///
/// Responds once the platform has accepted the request. The job itself
/// reaches browsers through the live gallery.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTestJobInput>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedTestJob>>)> {
    validate_job_type(&input.job_type)?;

    let job_id = create_test_job(state.procedures.as_ref(), &input.job_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedTestJob { job_id },
        }),
    ))
}
