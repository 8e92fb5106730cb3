//! Transport interface.
//!
//! This module provides the traits a backend implements to perform exchanges, and the
//! type-erased forms the facade stores.

mod any;
mod backend;

pub use any::{AnyBackend, AnyRawResponse, AnyTransport};
pub use backend::{Backend, RawResponse, Transport};
