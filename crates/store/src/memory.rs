//! In-process document store.
//!
//! Mirrors the query semantics of the real store closely enough for tests
//! and offline runs: documents missing the `order_by` field are excluded,
//! results are sorted by that field and truncated to the limit. It also
//! answers `createTestJob` by inserting a pending job.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use v3_core::job::{parse_timestamp, JOBS_COLLECTION};
use v3_core::test_job::{CreateJobRequest, CreateJobResponse};

use crate::document::Document;
use crate::error::StoreError;
use crate::query::{Direction, Query};
use crate::store::{DocumentStore, JobProcedures};

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Document>>,
    /// When set, every query fails with this message.
    unavailable: Option<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a document by id.
    pub async fn upsert(&self, collection: &str, doc: Document) {
        let mut inner = self.inner.write().await;
        let docs = inner.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == doc.id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
    }

    /// Replace the whole contents of a collection.
    pub async fn replace_all(&self, collection: &str, docs: Vec<Document>) {
        self.inner
            .write()
            .await
            .collections
            .insert(collection.to_string(), docs);
    }

    /// Make subsequent queries fail (`Some`) or succeed again (`None`).
    pub async fn set_unavailable(&self, reason: Option<String>) {
        self.inner.write().await.unavailable = reason;
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.inner
            .read()
            .await
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn run_query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.read().await;
        if let Some(reason) = &inner.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }

        let mut docs: Vec<Document> = inner
            .collections
            .get(&query.collection)
            .cloned()
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            docs.retain(|d| d.field(field).is_some_and(|v| !v.is_null()));
            // Stable sort keeps insertion order among equal keys.
            docs.sort_by(|a, b| {
                let ord = compare_values(&a.fields[field.as_str()], &b.fields[field.as_str()]);
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            docs.truncate(limit as usize);
        }

        Ok(docs)
    }
}

#[async_trait]
impl JobProcedures for MemoryStore {
    async fn create_test_job(
        &self,
        input: &CreateJobRequest,
    ) -> Result<CreateJobResponse, StoreError> {
        if let Some(reason) = &self.inner.read().await.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }

        let job_id = uuid::Uuid::new_v4().simple().to_string();
        let fields = json!({
            "status": "pending",
            "type": input.job_type,
            "prompt": input.prompt,
            "format": input.format,
            "createdAt": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        });

        self.upsert(JOBS_COLLECTION, Document::new(job_id.clone(), fields))
            .await;
        tracing::debug!(job_id = %job_id, "Inserted test job into memory store");

        Ok(CreateJobResponse { job_id })
    }
}

/// Order timestamps chronologically, numbers numerically, strings
/// lexically. Mixed kinds fall back to a fixed kind order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(ta), Some(tb)) = (parse_timestamp(a), parse_timestamp(b)) {
        return ta.cmp(&tb);
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_doc(id: &str, created_at: &str) -> Document {
        Document::new(id, json!({ "status": "pending", "createdAt": created_at }))
    }

    #[tokio::test]
    async fn recent_jobs_are_sorted_descending_and_limited() {
        let store = MemoryStore::new();
        store
            .replace_all(
                JOBS_COLLECTION,
                vec![
                    job_doc("a", "2024-01-01T00:00:00Z"),
                    job_doc("c", "2024-01-03T00:00:00Z"),
                    job_doc("b", "2024-01-02T00:00:00Z"),
                ],
            )
            .await;

        let docs = store.run_query(&Query::recent_jobs(2)).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[tokio::test]
    async fn documents_without_order_field_are_excluded() {
        let store = MemoryStore::new();
        store
            .upsert(JOBS_COLLECTION, Document::new("no-ts", json!({ "status": "pending" })))
            .await;
        store
            .upsert(JOBS_COLLECTION, job_doc("ts", "2024-01-01T00:00:00Z"))
            .await;

        let docs = store.run_query(&Query::recent_jobs(10)).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "ts");

        let all = store.run_query(&Query::collection(JOBS_COLLECTION)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_id() {
        let store = MemoryStore::new();
        store.upsert(JOBS_COLLECTION, job_doc("a", "2024-01-01T00:00:00Z")).await;
        store
            .upsert(
                JOBS_COLLECTION,
                Document::new("a", json!({ "status": "complete", "createdAt": "2024-01-01T00:00:00Z" })),
            )
            .await;

        assert_eq!(store.len(JOBS_COLLECTION).await, 1);
        let docs = store.run_query(&Query::recent_jobs(5)).await.unwrap();
        assert_eq!(docs[0].field("status"), Some(&json!("complete")));
    }

    #[tokio::test]
    async fn unavailable_store_fails_queries() {
        let store = MemoryStore::new();
        store.set_unavailable(Some("offline".into())).await;

        let err = store.run_query(&Query::recent_jobs(5)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(ref m) if m == "offline"));
    }

    #[tokio::test]
    async fn create_test_job_inserts_pending_document() {
        let store = MemoryStore::new();
        let resp = store
            .create_test_job(&CreateJobRequest::test_job("image"))
            .await
            .unwrap();

        let docs = store.run_query(&Query::recent_jobs(5)).await.unwrap();
        assert_eq!(docs.len(), 1);
        let job = docs[0].to_job();
        assert_eq!(job.id, resp.job_id);
        assert_eq!(job.status, v3_core::job::JobStatus::Pending);
        assert_eq!(job.format.as_deref(), Some("1:1"));
        assert!(job.created_at.is_some());
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare_values(&json!(9), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!("9"), &json!("10")), Ordering::Greater);
    }
}
