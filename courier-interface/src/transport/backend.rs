//! Core transport traits.
//!
//! Backend developers implement `Backend` and `Transport`, along with a custom `RawResponse`
//! type.

use std::fmt;

use crate::client::TransportOptions;
use crate::Request;

/// A component able to perform HTTP exchanges.
///
/// A transport must be safe to use from many threads at once: the facade issues concurrent
/// exchanges through one shared instance.
pub trait Transport: Send + Sync + 'static {
    /// The type of response returned by this transport.
    type Response: RawResponse;

    /// Provides a textual description of this transport.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport")
    }

    /// Performs exactly one exchange and returns the response head with an undrained body.
    ///
    /// The returned response owns whatever connection resource the exchange acquired. Dropping
    /// it releases that resource.
    fn exchange(&self, req: Request) -> crate::Result<Self::Response>;
}

/// Trait for backends that create transports.
pub trait Backend: Send + Sync + 'static {
    /// The type of transport this backend creates.
    type Transport: Transport;

    /// Creates a new transport with the given options.
    fn create_transport(&self, options: TransportOptions) -> crate::Result<Self::Transport>;
}

/// A response as received by a transport.
///
/// ## Body Reading
///
/// `bytes` uses a `&mut self` receiver to stay object safe. The facade calls it at most once
/// per response and drops the response right after.
pub trait RawResponse: Send + 'static {
    /// Provides a textual description of this response.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawResponse")
    }

    /// Returns the HTTP status code of this response.
    fn status(&self) -> u16;

    /// Returns every response header in received order.
    fn headers(&self) -> Vec<(String, String)>;

    /// Returns the content-length of the response body, if known.
    fn content_length(&self) -> Option<u64>;

    /// Drains the response body.
    fn bytes(&mut self) -> crate::Result<Vec<u8>>;
}
