/// Workflow API client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the workflow API (default: `http://localhost:3000/api/v1`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                        |
    /// |-----------------------------|--------------------------------|
    /// | `WORKFLOW_API_URL`          | `http://localhost:3000/api/v1` |
    /// | `WORKFLOW_API_TIMEOUT_SECS` | `30`                           |
    pub fn from_env() -> Self {
        let base_url = std::env::var("WORKFLOW_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".into());

        let request_timeout_secs: u64 = std::env::var("WORKFLOW_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("WORKFLOW_API_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }

    /// Read `.env` if present, then load from the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/v1".to_string(),
            request_timeout_secs: 30,
        }
    }
}
