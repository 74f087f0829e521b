//! Plain-text formatting of job documents for the terminal.

use std::fmt::Write as _;

use serde_json::Value;
use v3_core::job::Job;

/// Printed in place of a field the document does not have.
pub const MISSING: &str = "undefined";

pub const BANNER: &str = "🔍 Checking jobs in Firestore...";
pub const NO_JOBS: &str = "No jobs found.";

/// Format one job as an indented block, including its trailing blank line.
pub fn format_job(job: &Job) -> String {
    let mut out = String::new();
    let or_missing = |v: &Option<String>| v.as_deref().unwrap_or(MISSING).to_string();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "📋 Job ID: {}", job.id);
    let _ = writeln!(out, "   Status: {}", job.status_label());
    let _ = writeln!(out, "   Type: {}", or_missing(&job.job_type));
    let _ = writeln!(out, "   Prompt: {}", or_missing(&job.prompt));
    let _ = writeln!(out, "   Format: {}", or_missing(&job.format));

    if let Some(result) = &job.result {
        let shown = match &result.metadata {
            Some(metadata) => metadata.clone(),
            None => serde_json::to_value(result).unwrap_or(Value::Null),
        };
        let pretty = serde_json::to_string_pretty(&shown).unwrap_or_else(|_| shown.to_string());
        let _ = writeln!(out, "   Result: {pretty}");
    }
    if let Some(error) = &job.error {
        let _ = writeln!(out, "   Error: {error}");
    }

    out.push('\n');
    out
}
