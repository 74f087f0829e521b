use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the server stops (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Live gallery settings.
    pub gallery: GalleryConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `5`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            gallery: GalleryConfig::from_env(),
        }
    }
}

/// Where the gallery reads jobs from and sends create requests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryBackend {
    /// Firestore REST plus Firebase callable functions.
    Firebase,
    /// In-process store; no network access.
    Memory,
}

impl GalleryBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "firebase" => Some(Self::Firebase),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Settings for the live job listing.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Maximum number of jobs shown (default: `50`).
    pub limit: u32,
    /// Interval between live-query polls (default: `2000` ms).
    pub poll_interval: Duration,
    pub backend: GalleryBackend,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            limit: 50,
            poll_interval: Duration::from_millis(2000),
            backend: GalleryBackend::Firebase,
        }
    }
}

impl GalleryConfig {
    /// | Env Var            | Default    |
    /// |--------------------|------------|
    /// | `GALLERY_LIMIT`    | `50`       |
    /// | `POLL_INTERVAL_MS` | `2000`     |
    /// | `GALLERY_BACKEND`  | `firebase` |
    pub fn from_env() -> Self {
        let limit: u32 = std::env::var("GALLERY_LIMIT")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("GALLERY_LIMIT must be a valid u32");

        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("POLL_INTERVAL_MS must be a valid u64");

        let backend = std::env::var("GALLERY_BACKEND")
            .ok()
            .map(|raw| {
                GalleryBackend::parse(&raw)
                    .unwrap_or_else(|| panic!("GALLERY_BACKEND must be 'firebase' or 'memory', got '{raw}'"))
            })
            .unwrap_or(GalleryBackend::Firebase);

        Self {
            limit,
            poll_interval: Duration::from_millis(poll_interval_ms),
            backend,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
