//! Ordered, limited collection queries.

use serde_json::{json, Value};
use v3_core::job::{CREATED_AT_FIELD, JOBS_COLLECTION};

/// Sort direction for [`Query::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_wire(&self) -> &'static str {
        match self {
            Self::Ascending => "ASCENDING",
            Self::Descending => "DESCENDING",
        }
    }
}

/// A single-collection query with optional ordering and a limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: String,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<u32>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            order_by: None,
            limit: None,
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Most recent jobs first, at most `limit` of them.
    pub fn recent_jobs(limit: u32) -> Self {
        Self::collection(JOBS_COLLECTION)
            .order_by(CREATED_AT_FIELD, Direction::Descending)
            .limit(limit)
    }

    /// Body for Firestore's `documents:runQuery` endpoint.
    pub fn to_run_query_body(&self) -> Value {
        let mut structured = json!({
            "from": [{ "collectionId": self.collection }],
        });

        if let Some((field, direction)) = &self.order_by {
            structured["orderBy"] = json!([{
                "field": { "fieldPath": field },
                "direction": direction.as_wire(),
            }]);
        }
        if let Some(limit) = self.limit {
            structured["limit"] = json!(limit);
        }

        json!({ "structuredQuery": structured })
    }
}
