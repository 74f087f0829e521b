//! The `jobs` document as read from the external store.
//!
//! The schema is owned by the service that writes these documents. This
//! module only reads it, so decoding is lenient: a field that is missing
//! or has an unexpected type is treated as absent instead of failing the
//! whole document.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{DocId, Timestamp};

/// Name of the collection holding job documents.
pub const JOBS_COLLECTION: &str = "jobs";

/// Field used as the ordering key for job listings.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Lifecycle state of a job, driven by the external worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Complete,
    Error,
    /// Missing or unrecognised status value.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Parse a raw status string. Anything unrecognised maps to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "complete" => Self::Complete,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }

}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output attached by the worker once a job completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl JobResult {
    /// Build from a decoded `result` map. Non-object values yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            url: map.get("url").and_then(non_empty_str),
            metadata: map.get("metadata").filter(|m| !m.is_null()).cloned(),
        })
    }

    /// True when `metadata.note` is present and truthy.
    ///
    /// The worker sets a note when it returned placeholder output instead
    /// of a real generation.
    pub fn is_demo(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("note"))
            .is_some_and(is_truthy)
    }
}

/// A single document from the `jobs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: DocId,
    #[serde(default = "unknown_status")]
    pub status: JobStatus,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub result: Option<JobResult>,
    #[serde(default)]
    pub error: Option<String>,
    /// The stored status text when it is not one of the known values.
    #[serde(skip)]
    pub raw_status: Option<String>,
}

fn unknown_status() -> JobStatus {
    JobStatus::Unknown
}

impl Job {
    /// A bare job with only an id and status. Handy for building fixtures.
    pub fn new(id: impl Into<DocId>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            status,
            job_type: None,
            format: None,
            prompt: None,
            created_at: None,
            result: None,
            error: None,
            raw_status: None,
        }
    }

    /// Decode a job from its document id and plain-JSON field map.
    ///
    /// Never fails. Fields with the wrong shape are dropped.
    pub fn from_fields(id: impl Into<DocId>, fields: &Value) -> Self {
        let get = |key: &str| fields.get(key).filter(|v| !v.is_null());
        let raw_status = get("status").and_then(non_empty_str);
        let status = raw_status
            .as_deref()
            .map(JobStatus::parse)
            .unwrap_or(JobStatus::Unknown);

        Self {
            id: id.into(),
            status,
            raw_status: raw_status.filter(|_| status == JobStatus::Unknown),
            job_type: get("type").and_then(non_empty_str),
            format: get("format").and_then(non_empty_str),
            prompt: get("prompt").and_then(non_empty_str),
            created_at: get(CREATED_AT_FIELD).and_then(parse_timestamp),
            result: get("result").and_then(JobResult::from_value),
            error: get("error").and_then(error_text),
        }
    }

    /// Status as shown to people: the stored text for statuses this crate
    /// does not know, `unknown` when there is none.
    pub fn status_label(&self) -> &str {
        self.raw_status
            .as_deref()
            .unwrap_or_else(|| self.status.as_str())
    }

    /// Image URL to preview, only for completed jobs.
    pub fn preview_url(&self) -> Option<&str> {
        match self.status {
            JobStatus::Complete => self.result.as_ref()?.url.as_deref(),
            _ => None,
        }
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Errors are usually strings, but some writers store `{ message }`.
fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map.get("message").and_then(non_empty_str),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Accepts RFC 3339 strings and the `{seconds, nanos}` /
/// `{_seconds, _nanoseconds}` shapes used by the admin SDKs.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(map) => {
            let secs = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(as_i64)?;
            let nanos = map
                .get("nanos")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(as_i64)
                .unwrap_or(0);
            Utc.timestamp_opt(secs, u32::try_from(nanos).ok()?).single()
        }
        _ => None,
    }
}

/// Firestore encodes 64-bit integers as strings in JSON.
fn as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parse_roundtrips_known_values() {
        for status in [
            JobStatus::Pending,
            JobStatus::Processing,
            JobStatus::Complete,
            JobStatus::Error,
        ] {
            assert_eq!(JobStatus::parse(status.as_str()), status);
        }
        assert_eq!(JobStatus::parse("cancelled"), JobStatus::Unknown);
    }

    #[test]
    fn status_deserializes_unknown_values() {
        let status: JobStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, JobStatus::Unknown);
    }

    #[test]
    fn from_fields_reads_complete_document() {
        let fields = json!({
            "status": "complete",
            "type": "image",
            "format": "1:1",
            "prompt": "A beautiful sunset landscape",
            "createdAt": "2024-05-01T12:00:00Z",
            "result": {
                "url": "https://cdn.example.com/a.png",
                "metadata": { "note": "demo output", "model": "x" }
            }
        });

        let job = Job::from_fields("abc123def456", &fields);

        assert_eq!(job.id, "abc123def456");
        assert_eq!(job.status, JobStatus::Complete);
        assert_eq!(job.job_type.as_deref(), Some("image"));
        assert_eq!(job.format.as_deref(), Some("1:1"));
        assert_eq!(
            job.created_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(job.preview_url(), Some("https://cdn.example.com/a.png"));
        assert!(job.result.unwrap().is_demo());
    }

    #[test]
    fn from_fields_tolerates_missing_and_mistyped_fields() {
        let fields = json!({
            "status": 7,
            "prompt": ["not", "a", "string"],
            "createdAt": false,
            "result": "oops",
        });

        let job = Job::from_fields("x", &fields);

        assert_eq!(job.status, JobStatus::Unknown);
        assert!(job.prompt.is_none());
        assert!(job.created_at.is_none());
        assert!(job.result.is_none());
        assert!(job.error.is_none());
    }

    #[test]
    fn from_fields_on_non_object_yields_bare_job() {
        let job = Job::from_fields("x", &Value::Null);
        assert_eq!(job, Job::new("x", JobStatus::Unknown));
    }

    #[test]
    fn unrecognised_status_keeps_its_text_for_display() {
        let job = Job::from_fields("x", &json!({ "status": "cancelled" }));
        assert_eq!(job.status, JobStatus::Unknown);
        assert_eq!(job.status_label(), "cancelled");

        let known = Job::from_fields("y", &json!({ "status": "complete" }));
        assert!(known.raw_status.is_none());
        assert_eq!(known.status_label(), "complete");

        assert_eq!(Job::from_fields("z", &json!({})).status_label(), "unknown");
    }

    #[test]
    fn preview_url_requires_complete_status() {
        let mut job = Job::new("x", JobStatus::Processing);
        job.result = Some(JobResult {
            url: Some("u".into()),
            metadata: None,
        });
        assert!(job.preview_url().is_none());

        job.status = JobStatus::Complete;
        assert_eq!(job.preview_url(), Some("u"));
    }

    #[test]
    fn demo_note_must_be_truthy() {
        let with = |note: Value| JobResult {
            url: None,
            metadata: Some(json!({ "note": note })),
        };
        assert!(with(json!("placeholder")).is_demo());
        assert!(with(json!(true)).is_demo());
        assert!(!with(json!("")).is_demo());
        assert!(!with(json!(false)).is_demo());
        assert!(!with(Value::Null).is_demo());
        assert!(!JobResult::default().is_demo());
    }

    #[test]
    fn error_accepts_message_objects() {
        let job = Job::from_fields("x", &json!({ "status": "error", "error": { "message": "boom" } }));
        assert_eq!(job.error.as_deref(), Some("boom"));
    }

    #[test]
    fn parse_timestamp_accepts_admin_sdk_shapes() {
        let expected = Utc.timestamp_opt(1_700_000_000, 5).single();
        assert_eq!(
            parse_timestamp(&json!({ "_seconds": 1_700_000_000, "_nanoseconds": 5 })),
            expected
        );
        assert_eq!(
            parse_timestamp(&json!({ "seconds": "1700000000", "nanos": 5 })),
            expected
        );
        assert!(parse_timestamp(&json!("yesterday")).is_none());
    }
}
