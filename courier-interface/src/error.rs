//! Error types for courier transports.

use thiserror::Error;

/// Reasons an exchange could not be completed.
#[derive(Debug, Error)]
pub enum Error {
    /// The target is not a valid absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// An underlying I/O error occurred.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The response body exceeds the maximum allowed size.
    #[error("Response body size exceeds max limit")]
    ResponseTooLarge,
    /// The request timed out before completion.
    #[error("Request is not finished within timeout")]
    RequestTimeout,
    /// No usable transport could be created.
    #[error("No transport available: {0}")]
    Unavailable(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, Error>;
