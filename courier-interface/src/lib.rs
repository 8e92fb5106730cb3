//! Interface definitions for courier transports.
//!
//! This crate describes the one capability the `courier` facade needs from the outside world: a
//! transport able to perform a single HTTP exchange. It defines the raw request and body types
//! handed to a transport, the traits a transport implements, and the type-erased forms the facade
//! stores.
//!
//! ## Backend Registration
//!
//! A backend creates transports from [`client::TransportOptions`]. Backend crates register
//! themselves with [`register_backend`] so that the facade can build a default transport without
//! naming the backend.
//!
//! ## Features
//!
//! - `multipart`: Enable multipart form bodies

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod body;
pub mod client;
mod error;
#[doc(hidden)] // For courier facade only
pub mod register;
mod request;
pub mod transport;

pub use body::{Body, BoxedStream, StreamReader};
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub use body::{Part, PartBody};
pub use error::{Error, Result};
pub use register::register_backend;
pub use request::{Method, Request};
pub use transport::{
    AnyBackend, AnyRawResponse, AnyTransport, Backend, RawResponse, Transport,
};
