//! Request template for the remote `createTestJob` procedure.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of the remote procedure that creates a job document.
pub const CREATE_TEST_JOB_PROCEDURE: &str = "createTestJob";

/// Job type that gets a square format; everything else is widescreen.
pub const IMAGE_JOB_TYPE: &str = "image";

/// Input for `createTestJob`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJobRequest {
    #[serde(rename = "type")]
    pub job_type: String,
    pub prompt: String,
    pub format: String,
}

/// Output of `createTestJob`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub job_id: String,
}

impl CreateJobRequest {
    /// Build the fixed test-job request for `job_type`.
    pub fn test_job(job_type: &str) -> Self {
        let subject = if job_type == IMAGE_JOB_TYPE {
            "sunset landscape"
        } else {
            "nature timelapse"
        };

        Self {
            job_type: job_type.to_string(),
            prompt: format!("A beautiful {subject}"),
            format: format_for_type(job_type).to_string(),
        }
    }
}

/// Aspect ratio used for a job of the given type.
pub fn format_for_type(job_type: &str) -> &'static str {
    if job_type == IMAGE_JOB_TYPE {
        "1:1"
    } else {
        "16:9"
    }
}

/// Job types are free-form but must not be blank.
pub fn validate_job_type(job_type: &str) -> Result<(), CoreError> {
    if job_type.trim().is_empty() {
        return Err(CoreError::Validation("job type must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_request_is_square_sunset() {
        let req = CreateJobRequest::test_job("image");
        assert_eq!(req.job_type, "image");
        assert_eq!(req.prompt, "A beautiful sunset landscape");
        assert_eq!(req.format, "1:1");
    }

    #[test]
    fn other_types_are_widescreen_timelapse() {
        for job_type in ["video", "audio"] {
            let req = CreateJobRequest::test_job(job_type);
            assert_eq!(req.prompt, "A beautiful nature timelapse");
            assert_eq!(req.format, "16:9");
        }
    }

    #[test]
    fn request_serializes_type_field() {
        let json = serde_json::to_value(CreateJobRequest::test_job("video")).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["format"], "16:9");
    }

    #[test]
    fn response_reads_camel_case_job_id() {
        let resp: CreateJobResponse =
            serde_json::from_value(serde_json::json!({ "jobId": "j-1" })).unwrap();
        assert_eq!(resp.job_id, "j-1");
    }

    #[test]
    fn blank_job_type_is_rejected() {
        assert!(validate_job_type("  ").is_err());
        assert!(validate_job_type("video").is_ok());
    }
}
