//! Type-erased transport traits.
//!
//! The traits in this module are automatically implemented for types that implement the
//! corresponding traits from the `transport::backend` module, so backend developers don't need
//! to implement them directly.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::backend::{Backend, RawResponse, Transport};
use crate::client::TransportOptions;
use crate::{Request, Result};

/// Trait for type-erased backends.
///
/// Automatically implemented for types implementing `Backend`.
pub trait AnyBackend: Send + Sync + 'static {
    /// Creates a new transport with the given options.
    fn create_transport(&self, options: TransportOptions) -> Result<Arc<dyn AnyTransport>>;
}

/// Trait for type-erased transports.
///
/// Automatically implemented for types implementing `Transport`.
pub trait AnyTransport: Any + Send + Sync + 'static {
    /// Provides a textual description of this transport.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// Performs exactly one exchange.
    fn exchange(&self, req: Request) -> Result<Box<dyn AnyRawResponse>>;
}

/// Trait for type-erased raw responses.
///
/// Automatically implemented for types implementing `RawResponse`.
pub trait AnyRawResponse: Any + Send + 'static {
    /// Provides a textual description of this response.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// Returns the HTTP status code of this response.
    fn status(&self) -> u16;
    /// Returns every response header in received order.
    fn headers(&self) -> Vec<(String, String)>;
    /// Returns the content-length of the response body, if known.
    fn content_length(&self) -> Option<u64>;
    /// Drains the response body.
    fn bytes(&mut self) -> Result<Vec<u8>>;
}

impl<B> AnyBackend for B
where
    B: Backend,
{
    fn create_transport(&self, options: TransportOptions) -> Result<Arc<dyn AnyTransport>> {
        Ok(Arc::new(Backend::create_transport(self, options)?))
    }
}

impl<T> AnyTransport for T
where
    T: Transport,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Transport::describe(self, f)
    }

    fn exchange(&self, req: Request) -> Result<Box<dyn AnyRawResponse>> {
        Ok(Box::new(Transport::exchange(self, req)?))
    }
}

impl<R> AnyRawResponse for R
where
    R: RawResponse,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RawResponse::describe(self, f)
    }

    fn status(&self) -> u16 {
        RawResponse::status(self)
    }

    fn headers(&self) -> Vec<(String, String)> {
        RawResponse::headers(self)
    }

    fn content_length(&self) -> Option<u64> {
        RawResponse::content_length(self)
    }

    fn bytes(&mut self) -> Result<Vec<u8>> {
        RawResponse::bytes(self)
    }
}
