use std::borrow::Cow;
use std::fmt;

use crate::status::StatusCode;

/// A completed exchange: status, headers and the fully drained body.
///
/// Responses are immutable snapshots. The connection that produced them has already been
/// released.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Creates a response from its parts.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::new(status),
            headers,
            body,
        }
    }

    /// Get the `StatusCode` of this response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the status code as a number.
    pub fn status_code(&self) -> u16 {
        self.status.code()
    }

    /// Check if status is informational. See [`StatusCode::is_informational`].
    pub fn is_informational(&self) -> bool {
        self.status.is_informational()
    }

    /// Check if status is successful. See [`StatusCode::is_successful`].
    pub fn is_successful(&self) -> bool {
        self.status.is_successful()
    }

    /// Check if status is a redirection. See [`StatusCode::is_redirection`].
    pub fn is_redirection(&self) -> bool {
        self.status.is_redirection()
    }

    /// Check if status is a client error. See [`StatusCode::is_client_error`].
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if status is a server error. See [`StatusCode::is_server_error`].
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Every header in received order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The value of the first header named exactly `key`.
    ///
    /// Names are compared case-sensitively. When no header matches, the text
    /// `No Header with key <key>` is returned instead.
    pub fn header(&self, key: &str) -> Cow<'_, str> {
        match self.headers.iter().find(|(k, _)| k == key) {
            Some((_, value)) => Cow::Borrowed(value),
            None => Cow::Owned(format!("No Header with key {key}")),
        }
    }

    /// The values of every header named exactly `key`, in received order.
    pub fn header_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The body as text. Invalid UTF-8 sequences are replaced.
    pub fn content(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// The body as raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Takes the body out of this response.
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Deserializes the body as JSON.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn parse_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::ParseError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Deserializes the body as a JSON array.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn parse_as_list<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<Vec<T>, crate::ParseError> {
        self.parse_as()
    }

    /// Parses the body into an untyped JSON tree.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn parse_as_value(&self) -> Result<serde_json::Value, crate::ParseError> {
        self.parse_as()
    }

    /// Logs this response at `INFO` level.
    pub fn log_response(&self) -> &Self {
        tracing::info!("{}", self);
        self
    }

    /// Logs the text produced by `describe` at `INFO` level.
    pub fn log_response_with(&self, describe: impl FnOnce(&Self) -> String) -> &Self {
        tracing::info!("{}", describe(self));
        self
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response [status={}, content={}]",
            self.status,
            self.content()
        )
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("content_length", &self.body.len())
            .finish()
    }
}
