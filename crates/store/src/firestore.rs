//! Firestore REST client.
//!
//! Wraps the `documents:runQuery` endpoint using [`reqwest`]. Responses are
//! a JSON array of `{document?, readTime}` items; an item without a
//! `document` only carries the read time and is skipped.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::FirebaseConfig;
use crate::credentials::ServiceAccountTokenProvider;
use crate::document::{Document, RawDocument};
use crate::error::StoreError;
use crate::query::Query;
use crate::store::DocumentStore;

/// How requests to the store are authenticated.
#[derive(Clone)]
pub enum StoreAuth {
    /// No credentials; access is governed by the project's security rules.
    Anonymous,
    /// Web API key sent as the `key` query parameter.
    ApiKey(String),
    /// Bearer tokens issued for a service account.
    ServiceAccount(Arc<ServiceAccountTokenProvider>),
}

/// HTTP client for one Firestore database.
pub struct FirestoreClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    database: String,
    auth: StoreAuth,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<RawDocument>,
}

impl FirestoreClient {
    /// Create a client for `project_id` using the settings in `config`.
    pub fn new(config: &FirebaseConfig, project_id: impl Into<String>, auth: StoreAuth) -> Self {
        Self::with_client(reqwest::Client::new(), config, project_id, auth)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: &FirebaseConfig,
        project_id: impl Into<String>,
        auth: StoreAuth,
    ) -> Self {
        Self {
            client,
            base_url: config.firestore_base_url.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database: config.database.clone(),
            auth,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Root under which collections live.
    pub fn documents_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            self.base_url, self.project_id, self.database
        )
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        Ok(match &self.auth {
            StoreAuth::Anonymous => request,
            StoreAuth::ApiKey(key) => request.query(&[("key", key)]),
            StoreAuth::ServiceAccount(provider) => {
                request.bearer_auth(provider.access_token().await?)
            }
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`StoreError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn run_query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let request = self
            .client
            .post(format!("{}:runQuery", self.documents_url()))
            .json(&query.to_run_query_body());

        let response = self.authorize(request).await?.send().await?;
        let response = Self::ensure_success(response).await?;

        let items: Vec<RunQueryItem> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("runQuery response: {e}")))?;

        let documents = items
            .into_iter()
            .filter_map(|item| item.document)
            .map(Document::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            collection = %query.collection,
            count = documents.len(),
            "Query returned documents",
        );

        Ok(documents)
    }
}
