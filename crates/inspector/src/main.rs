//! `check-jobs` -- print the five most recent jobs and exit.
//!
//! Authenticates with a service-account key, lists the newest documents
//! in the `jobs` collection, and exits 0 on success (including when there
//! are none) or 1 on any failure.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default                    |
//! |----------------------------------|----------|----------------------------|
//! | `GOOGLE_APPLICATION_CREDENTIALS` | no       | `./serviceAccountKey.json` |
//! | `FIREBASE_PROJECT_ID`            | no       | key file's `project_id`    |
//! | `FIRESTORE_DATABASE`             | no       | `(default)`                |
//! | `FIRESTORE_BASE_URL`             | no       | `https://firestore.googleapis.com` |

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use v3_inspector::{inspect, InspectError};
use v3_store::config::FirebaseConfig;
use v3_store::credentials::{ServiceAccountKey, ServiceAccountTokenProvider};
use v3_store::firestore::{FirestoreClient, StoreAuth};

const DEFAULT_CREDENTIALS_PATH: &str = "./serviceAccountKey.json";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "v3_inspector=warn,v3_store=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(count) => {
            tracing::debug!(count, "Inspection complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<usize, InspectError> {
    let credentials_path: PathBuf = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
        .unwrap_or_else(|_| DEFAULT_CREDENTIALS_PATH.into())
        .into();

    let key = ServiceAccountKey::from_file(&credentials_path)?;
    let config = FirebaseConfig::from_env();
    let project_id = config
        .project_id
        .clone()
        .unwrap_or_else(|| key.project_id.clone());

    tracing::info!(
        project_id = %project_id,
        client_email = %key.client_email,
        "Loaded service-account credentials",
    );

    let provider = Arc::new(ServiceAccountTokenProvider::new(key));
    let store = FirestoreClient::new(&config, project_id, StoreAuth::ServiceAccount(provider));

    let mut stdout = std::io::stdout().lock();
    inspect(&store, &mut stdout).await
}
