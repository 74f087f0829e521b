//! Client for Firebase callable functions.
//!
//! Callable functions take `POST {base}/{name}` with a body of
//! `{"data": <input>}` and answer `{"result": <output>}` on success or
//! `{"error": {"status", "message"}}` on failure.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use v3_core::test_job::{CreateJobRequest, CreateJobResponse, CREATE_TEST_JOB_PROCEDURE};

use crate::error::StoreError;
use crate::store::JobProcedures;

/// HTTP client for the callable functions of one project.
pub struct CallableClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct CallRequest<'a, I> {
    data: &'a I,
}

#[derive(Deserialize)]
struct CallResponse<O> {
    result: O,
}

#[derive(Deserialize)]
struct CallErrorBody {
    error: CallError,
}

#[derive(Deserialize)]
struct CallError {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl CallableClient {
    /// * `base_url` - e.g. `https://us-central1-my-project.cloudfunctions.net`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke the callable function `name` with `input`.
    pub async fn call<I, O>(&self, name: &str, input: &I) -> Result<O, StoreError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, name))
            .json(&CallRequest { data: input })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<CallErrorBody>(&body) {
                Ok(CallErrorBody { error }) => StoreError::Procedure {
                    status: error.status.unwrap_or_else(|| status.as_u16().to_string()),
                    message: error.message.unwrap_or_else(|| body.clone()),
                },
                Err(_) => StoreError::Api {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        serde_json::from_str::<CallResponse<O>>(&body)
            .map(|r| r.result)
            .map_err(|e| StoreError::Decode(format!("{name} response: {e}")))
    }
}

#[async_trait]
impl JobProcedures for CallableClient {
    async fn create_test_job(
        &self,
        input: &CreateJobRequest,
    ) -> Result<CreateJobResponse, StoreError> {
        self.call(CREATE_TEST_JOB_PROCEDURE, input).await
    }
}
