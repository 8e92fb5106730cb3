use std::io;

use courier_interface::Error as CourierError;
use thiserror::Error;

/// Errors raised inside the reqwest backend before they are mapped to transport errors.
#[derive(Error, Debug)]
pub enum ReqwestBackendError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("response too large")]
    ResponseTooLarge,
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ReqwestBackendError> for CourierError {
    fn from(err: ReqwestBackendError) -> Self {
        match err {
            ReqwestBackendError::Reqwest(e) => {
                if e.is_timeout() {
                    CourierError::RequestTimeout
                } else {
                    CourierError::Io(io::Error::other(e))
                }
            }
            ReqwestBackendError::ResponseTooLarge => CourierError::ResponseTooLarge,
            ReqwestBackendError::InvalidUrl(url) => CourierError::InvalidUrl(url),
            ReqwestBackendError::Io(e) => CourierError::Io(e),
            other => CourierError::Io(io::Error::other(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReqwestBackendError>;
