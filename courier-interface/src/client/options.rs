//! Configuration options for transports.

use std::time::Duration;

/// Configuration options for creating a transport.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Optional User-Agent header value to use for all requests.
    pub user_agent: Option<String>,
    /// Headers to include in all requests by default.
    pub default_headers: Vec<(String, String)>,
    /// Whether to use the system's default proxy settings.
    pub use_default_proxy: bool,
    /// Whether to automatically follow redirect responses.
    pub follow_redirects: bool,
    /// Optional maximum buffer size for response bodies.
    pub max_response_buffer_size: Option<u64>,
    /// Optional timeout duration for requests.
    pub request_timeout: Option<Duration>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            default_headers: vec![],
            use_default_proxy: true,
            follow_redirects: true,
            max_response_buffer_size: None,
            request_timeout: None,
        }
    }
}
