//! Store documents and Firestore typed-value decoding.
//!
//! Firestore's REST API wraps every field in a typed envelope
//! (`{"stringValue": "x"}`, `{"mapValue": {"fields": {..}}}`, ...).
//! [`decode_fields`] flattens those envelopes into plain JSON so the rest of
//! the workspace can read documents without knowing the wire format.

use serde::Deserialize;
use serde_json::{Map, Value};
use v3_core::job::Job;
use v3_core::types::DocId;

use crate::error::StoreError;

/// A document as returned by a query: its key plus plain-JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocId,
    /// Always a JSON object.
    pub fields: Value,
}

impl Document {
    pub fn new(id: impl Into<DocId>, fields: Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Decode this document as a job. Never fails; see [`Job::from_fields`].
    pub fn to_job(&self) -> Job {
        Job::from_fields(self.id.clone(), &self.fields)
    }
}

/// A document exactly as Firestore sends it.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{coll}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl TryFrom<RawDocument> for Document {
    type Error = StoreError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let id = raw
            .name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::Decode(format!("document name has no id: {}", raw.name)))?;

        Ok(Document::new(id, decode_fields(&raw.fields)))
    }
}

/// Flatten a Firestore `fields` map into a plain JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), decode_value(v)))
            .collect(),
    )
}

/// Flatten a single Firestore typed value. Unknown envelopes become `null`.
pub fn decode_value(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = map.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" | "booleanValue"
        | "geoPointValue" => inner.clone(),
        // 64-bit integers travel as strings.
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| inner.clone()),
        "doubleValue" => inner.clone(),
        "nullValue" => Value::Null,
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_else(|| Value::Object(Map::new())),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_scalar_envelopes() {
        assert_eq!(decode_value(&json!({ "stringValue": "hi" })), json!("hi"));
        assert_eq!(decode_value(&json!({ "integerValue": "42" })), json!(42));
        assert_eq!(decode_value(&json!({ "doubleValue": 1.5 })), json!(1.5));
        assert_eq!(decode_value(&json!({ "booleanValue": true })), json!(true));
        assert_eq!(decode_value(&json!({ "nullValue": null })), Value::Null);
        assert_eq!(
            decode_value(&json!({ "timestampValue": "2024-05-01T12:00:00.123456Z" })),
            json!("2024-05-01T12:00:00.123456Z")
        );
    }

    #[test]
    fn decodes_nested_maps_and_arrays() {
        let raw = json!({
            "mapValue": { "fields": {
                "url": { "stringValue": "https://x/y.png" },
                "metadata": { "mapValue": { "fields": {
                    "note": { "stringValue": "demo" },
                    "sizes": { "arrayValue": { "values": [
                        { "integerValue": "512" },
                        { "integerValue": "1024" }
                    ] } }
                } } }
            } }
        });

        assert_eq!(
            decode_value(&raw),
            json!({
                "url": "https://x/y.png",
                "metadata": { "note": "demo", "sizes": [512, 1024] }
            })
        );
    }

    #[test]
    fn empty_map_and_array_envelopes() {
        assert_eq!(decode_value(&json!({ "mapValue": {} })), json!({}));
        assert_eq!(decode_value(&json!({ "arrayValue": {} })), json!([]));
    }

    #[test]
    fn unknown_envelope_is_null() {
        assert_eq!(decode_value(&json!({ "vectorValue": [1] })), Value::Null);
        assert_eq!(decode_value(&json!("bare")), Value::Null);
    }

    #[test]
    fn raw_document_id_is_last_path_segment() {
        let raw: RawDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/jobs/AbCdEfGh123",
            "fields": { "status": { "stringValue": "pending" } }
        }))
        .unwrap();

        let doc = Document::try_from(raw).unwrap();
        assert_eq!(doc.id, "AbCdEfGh123");
        assert_eq!(doc.field("status"), Some(&json!("pending")));
    }

    #[test]
    fn raw_document_without_id_is_rejected() {
        let raw = RawDocument {
            name: "projects/p/databases/(default)/documents/jobs/".to_string(),
            fields: Map::new(),
        };
        assert!(Document::try_from(raw).is_err());
    }
}
