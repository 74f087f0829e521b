/// Default Firestore REST host.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Default database id within a project.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Default region for callable functions.
pub const DEFAULT_FUNCTIONS_REGION: &str = "us-central1";

/// Connection settings for the Firebase project, loaded from environment
/// variables.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Project id. The inspector falls back to the credential file's id.
    pub project_id: Option<String>,
    /// Web API key, appended as `?key=` when no bearer token is used.
    pub api_key: Option<String>,
    /// Firestore database id (default: `(default)`).
    pub database: String,
    /// Firestore REST base URL, overridable for emulators.
    pub firestore_base_url: String,
    /// Region hosting the callable functions (default: `us-central1`).
    pub functions_region: String,
    /// Full base URL for callable functions; derived from region and
    /// project when unset.
    pub functions_base_url: Option<String>,
}

impl FirebaseConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                           |
    /// |-----------------------------|-----------------------------------|
    /// | `FIREBASE_PROJECT_ID`       | --                                |
    /// | `FIREBASE_API_KEY`          | --                                |
    /// | `FIRESTORE_DATABASE`        | `(default)`                       |
    /// | `FIRESTORE_BASE_URL`        | `https://firestore.googleapis.com`|
    /// | `FIREBASE_FUNCTIONS_REGION` | `us-central1`                     |
    /// | `FUNCTIONS_BASE_URL`        | `https://{region}-{project}.cloudfunctions.net` |
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            project_id: non_empty("FIREBASE_PROJECT_ID"),
            api_key: non_empty("FIREBASE_API_KEY"),
            database: non_empty("FIRESTORE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into()),
            firestore_base_url: non_empty("FIRESTORE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.into()),
            functions_region: non_empty("FIREBASE_FUNCTIONS_REGION")
                .unwrap_or_else(|| DEFAULT_FUNCTIONS_REGION.into()),
            functions_base_url: non_empty("FUNCTIONS_BASE_URL"),
        }
    }

    /// Base URL under which callable functions are addressed by name.
    pub fn functions_base_url(&self, project_id: &str) -> String {
        self.functions_base_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}-{}.cloudfunctions.net",
                self.functions_region, project_id
            )
        })
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            api_key: None,
            database: DEFAULT_DATABASE.into(),
            firestore_base_url: DEFAULT_FIRESTORE_BASE_URL.into(),
            functions_region: DEFAULT_FUNCTIONS_REGION.into(),
            functions_base_url: None,
        }
    }
}
