//! One-shot listing of the most recent jobs.

use std::io::Write;

use v3_store::store::recent_jobs;
use v3_store::{DocumentStore, StoreError};

use crate::report::{format_job, BANNER, NO_JOBS};

/// How many jobs a single inspection lists.
pub const INSPECT_LIMIT: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Query the newest jobs and write a report to `out`.
///
/// Returns how many jobs were listed. An empty collection is not an error.
pub async fn inspect<W: Write>(store: &dyn DocumentStore, out: &mut W) -> Result<usize, InspectError> {
    writeln!(out, "{BANNER}\n")?;

    let jobs = recent_jobs(store, INSPECT_LIMIT).await?;
    tracing::debug!(count = jobs.len(), "Fetched recent jobs");

    if jobs.is_empty() {
        writeln!(out, "{NO_JOBS}")?;
        return Ok(0);
    }

    for job in &jobs {
        write!(out, "{}", format_job(job))?;
    }
    out.flush()?;

    Ok(jobs.len())
}
