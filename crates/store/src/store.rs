//! The two external seams: reading documents and invoking procedures.

use async_trait::async_trait;
use v3_core::job::Job;
use v3_core::test_job::{CreateJobRequest, CreateJobResponse};

use crate::document::Document;
use crate::error::StoreError;
use crate::query::Query;

/// Read access to a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a one-shot query and return the matching documents in order.
    async fn run_query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;
}

/// The remote procedures this workspace invokes.
#[async_trait]
pub trait JobProcedures: Send + Sync {
    /// Ask the platform to create a job document.
    async fn create_test_job(
        &self,
        input: &CreateJobRequest,
    ) -> Result<CreateJobResponse, StoreError>;
}

/// Fetch the `limit` most recent jobs.
pub async fn recent_jobs(store: &dyn DocumentStore, limit: u32) -> Result<Vec<Job>, StoreError> {
    let docs = store.run_query(&Query::recent_jobs(limit)).await?;
    Ok(docs.iter().map(Document::to_job).collect())
}
