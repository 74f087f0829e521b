//! Construction of the store and procedure clients the server runs against.

use std::sync::Arc;

use v3_core::error::CoreError;
use v3_store::config::FirebaseConfig;
use v3_store::firestore::{FirestoreClient, StoreAuth};
use v3_store::functions::CallableClient;
use v3_store::memory::MemoryStore;
use v3_store::{DocumentStore, JobProcedures};

use crate::config::GalleryBackend;

/// The two external seams, ready to hand to the listener and handlers.
pub struct Backends {
    pub store: Arc<dyn DocumentStore>,
    pub procedures: Arc<dyn JobProcedures>,
}

/// Build clients for the selected backend.
///
/// The Firebase backend needs a project id. It authenticates with the web
/// API key when one is configured and anonymously otherwise.
pub fn connect(backend: GalleryBackend, firebase: &FirebaseConfig) -> Result<Backends, CoreError> {
    match backend {
        GalleryBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            tracing::info!("Using in-memory job store");
            Ok(Backends {
                store: store.clone(),
                procedures: store,
            })
        }
        GalleryBackend::Firebase => {
            let project_id = firebase.project_id.clone().ok_or_else(|| {
                CoreError::Validation("FIREBASE_PROJECT_ID must be set".to_string())
            })?;

            let auth = match &firebase.api_key {
                Some(key) => StoreAuth::ApiKey(key.clone()),
                None => StoreAuth::Anonymous,
            };
            let functions_url = firebase.functions_base_url(&project_id);
            tracing::info!(
                project_id = %project_id,
                functions_url = %functions_url,
                "Using Firebase job store",
            );

            Ok(Backends {
                store: Arc::new(FirestoreClient::new(firebase, project_id, auth)),
                procedures: Arc::new(CallableClient::new(functions_url)),
            })
        }
    }
}
