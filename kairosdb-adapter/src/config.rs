//! Client configuration.

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the KairosDB client.
///
/// ```rust
/// use std::time::Duration;
/// use kairosdb_adapter::KairosConfig;
///
/// let config = KairosConfig::new("http://kairosdb:8080")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url(), "http://kairosdb:8080");
/// ```
#[derive(Debug, Clone)]
pub struct KairosConfig {
    base_url: String,
    timeout: Duration,
}

impl KairosConfig {
    /// Create a configuration pointing at the given API endpoint root.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the request timeout applied by the HTTP transport.
    ///
    /// The adapter imposes no timeout of its own; this is passed through to
    /// the transport at construction time.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API endpoint root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
