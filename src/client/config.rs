//! Client Configuration
//!
//! Connection settings for the XFDocs backend. The base URL can be set
//! through the `XFDOCS_API_URL` environment variable; everything else has
//! a built-in default and can be overridden through the builder methods.

use std::time::Duration;

/// Default backend API root
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default delay between notification stream reconnect attempts
const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    reconnect_delay: Duration,
    request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        let base_url =
            std::env::var("XFDOCS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self {
            base_url,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            request_timeout: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the backend API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the delay between stream reconnect attempts
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Set a timeout applied to every REST request
    ///
    /// Left unset by default; the notification stream is exempt either way
    /// because a long-lived subscription would trip any whole-request
    /// timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
