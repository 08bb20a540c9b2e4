//! Client configuration
//!
//! | Variable                      | Default                 |
//! |-------------------------------|-------------------------|
//! | `SHINE_API_URL`               | `http://localhost:8080` |
//! | `SHINE_API_TOKEN`             | unset                   |
//! | `SHINE_API_TIMEOUT_SECS`      | `30`                    |
//! | `SHINE_SERVER_SIDE_THRESHOLD` | `100`                   |

use crate::http::NetworkHttpClient;
use crate::ClientResult;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_SIDE_THRESHOLD: u64 = 100;

/// Client configuration for connecting to the backend API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.example.com/v1")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory lists with more records than this are filtered server-side
    pub server_side_threshold: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            server_side_threshold: DEFAULT_SERVER_SIDE_THRESHOLD,
        }
    }

    /// Load `.env` (if present) and read the environment
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(
            lookup("SHINE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );
        config.token = lookup("SHINE_API_TOKEN").filter(|t| !t.is_empty());
        config.timeout = lookup("SHINE_API_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config.server_side_threshold = lookup("SHINE_SERVER_SIDE_THRESHOLD")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SERVER_SIDE_THRESHOLD);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the record count above which directory pages filter server-side
    pub fn with_server_side_threshold(mut self, threshold: u64) -> Self {
        self.server_side_threshold = threshold;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
