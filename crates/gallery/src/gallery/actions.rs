use v3_core::test_job::CreateJobRequest;
use v3_store::{JobProcedures, StoreError};

/// Ask the platform to create a test job of `job_type`.
///
/// The new job is not added to the gallery here; it shows up through the
/// live query once the platform has written it.
pub async fn create_test_job(
    procedures: &dyn JobProcedures,
    job_type: &str,
) -> Result<String, StoreError> {
    let request = CreateJobRequest::test_job(job_type);

    match procedures.create_test_job(&request).await {
        Ok(resp) => {
            tracing::info!(job_type, job_id = %resp.job_id, "Created test job");
            Ok(resp.job_id)
        }
        Err(e) => {
            tracing::error!(job_type, error = %e, "Error creating job");
            Err(e)
        }
    }
}
