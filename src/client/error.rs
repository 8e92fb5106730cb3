use thiserror::Error;

use courier_interface::Error as ErrorImpl;

use crate::TransportError;

/// The errors produced when building a client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildClientError {
    /// No backend registered and no bundled transport enabled.
    #[error("No backend registered. Please find a backend crate (e.g. courier-backend-reqwest) and call the `register` method at program startup.")]
    NoBackend,
    /// The backend has returned an error while creating the transport.
    #[error("Error creating transport: {0}")]
    BackendError(#[from] TransportError),
}

/// A `Result` alias where the `Err` case is [`BuildClientError`].
pub type BuildClientResult<T> = Result<T, BuildClientError>;

impl From<ErrorImpl> for BuildClientError {
    fn from(e: ErrorImpl) -> Self {
        Self::BackendError(e.into())
    }
}
