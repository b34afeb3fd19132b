//! Client configuration

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::session::KvStore;

/// Client configuration for connecting to the catalog backend
#[derive(Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3001")
    pub base_url: String,

    /// Explicit bearer token; takes precedence over any persisted token
    pub token: Option<String>,

    /// Persisted key-value store consulted for a stored token when no
    /// explicit token is set
    pub token_store: Option<Arc<dyn KvStore>>,

    /// Cancellation token raced against every request
    pub cancel: Option<CancellationToken>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            token_store: None,
            cancel: None,
            timeout: 30,
        }
    }

    /// Set the explicit bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the persisted token source
    pub fn with_token_store(mut self, store: Arc<dyn KvStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Set the cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3001")
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_deref().map(|_| "<set>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
