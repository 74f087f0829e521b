/// Errors from the document store and remote-procedure layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Store API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service-account credential could not be loaded or used.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The token endpoint rejected the credential.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// A remote procedure ran and reported an error.
    #[error("Procedure failed ({status}): {message}")]
    Procedure {
        /// Canonical error status, e.g. `INVALID_ARGUMENT`.
        status: String,
        message: String,
    },

    /// The store cannot be reached at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Procedure { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
