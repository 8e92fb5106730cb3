use thiserror::Error;

use courier_interface::Error as ErrorImpl;

/// The reasons an exchange could not be completed.
///
/// Always delivered as the failure case of an [`crate::Either`], never raised past the execution
/// boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The target is not a valid absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A generic transport error, e.g. connection refused or reset.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The transport has received a response body that exceeds the maximum size limit specified
    /// in [`crate::ClientBuilder::max_response_buffer_size`].
    #[error("Response body size exceeds max limit")]
    ResponseTooLarge,
    /// The transport is not able to finish the exchange within the timeout specified in
    /// [`crate::ClientBuilder::request_timeout`].
    #[error("Request is not finished within timeout")]
    RequestTimeout,
    /// No usable transport is available.
    #[error("No transport available: {0}")]
    Unavailable(String),
}

impl From<ErrorImpl> for TransportError {
    fn from(e: ErrorImpl) -> Self {
        match e {
            ErrorImpl::InvalidUrl(url) => Self::InvalidUrl(url),
            ErrorImpl::Io(e) => Self::Io(e),
            ErrorImpl::ResponseTooLarge => Self::ResponseTooLarge,
            ErrorImpl::RequestTimeout => Self::RequestTimeout,
            ErrorImpl::Unavailable(reason) => Self::Unavailable(reason),
        }
    }
}

/// A request target could not be parsed or rebuilt after a mutation.
#[derive(Debug, Error)]
#[error("Malformed target {target:?}: {source}")]
pub struct MalformedTargetError {
    /// The offending target.
    pub target: String,
    #[source]
    source: url::ParseError,
}

impl MalformedTargetError {
    pub(crate) fn new(target: impl Into<String>, source: url::ParseError) -> Self {
        Self {
            target: target.into(),
            source,
        }
    }
}

/// The wrong side of an [`crate::Either`] was inspected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidStateError {
    /// A failure value was requested from a success-case `Either`.
    #[error("Either holds a success value, not a failure")]
    NotFailure,
    /// A success value was requested from a failure-case `Either`.
    #[error("Either holds a failure value, not a success")]
    NotSuccess,
}

/// The content of a response could not be deserialized.
#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
#[derive(Debug, Error)]
#[error("Failed to parse response content: {0}")]
pub struct ParseError(#[from] serde_json::Error);

#[cfg(feature = "json")]
impl ParseError {
    /// The underlying deserialization error.
    pub fn inner(&self) -> &serde_json::Error {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn converts_every_transport_error() {
        let err: TransportError = ErrorImpl::InvalidUrl("nope".into()).into();
        assert!(matches!(err, TransportError::InvalidUrl(url) if url == "nope"));

        let err: TransportError =
            ErrorImpl::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")).into();
        assert!(matches!(
            err,
            TransportError::Io(e) if e.kind() == io::ErrorKind::ConnectionRefused
        ));

        let err: TransportError = ErrorImpl::ResponseTooLarge.into();
        assert!(matches!(err, TransportError::ResponseTooLarge));

        let err: TransportError = ErrorImpl::RequestTimeout.into();
        assert!(matches!(err, TransportError::RequestTimeout));

        let err: TransportError = ErrorImpl::Unavailable("none".into()).into();
        assert_eq!(err.to_string(), "No transport available: none");
    }

    #[test]
    fn malformed_target_keeps_source() {
        use std::error::Error as _;

        let err = MalformedTargetError::new("::", url::ParseError::RelativeUrlWithoutBase);
        assert_eq!(err.target, "::");
        assert!(err.source().is_some());
    }
}
