//! Session configuration.
//!
//! Where the backend lives is decided by the embedding application; this
//! type only carries the result. `from_env` covers the common case of a
//! CLI pointed at a deployment through environment variables.

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "NLAPI_BASE_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the streaming query endpoint.
pub const DEFAULT_ENDPOINT_PATH: &str = "/nlapi/openapi";

/// Configuration for a [`Session`](crate::session::Session).
///
/// # Example
///
/// ```ignore
/// use nlchat::config::SessionConfig;
///
/// let config = SessionConfig::new().with_base_url("https://api.example.com");
/// assert_eq!(config.endpoint_url(), "https://api.example.com/nlapi/openapi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Backend origin, without a trailing slash
    pub base_url: String,
    /// Path appended to `base_url` for queries
    pub endpoint_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a new SessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the base URL from `NLAPI_BASE_URL`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new().with_base_url(url),
            _ => Self::new(),
        }
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the query endpoint path.
    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.endpoint_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    /// Full URL of the query endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint_path)
    }
}
