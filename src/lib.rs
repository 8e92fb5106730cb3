//! A fluent blocking HTTP client with a uniform result type.
//!
//! ## Overview
//!
//! Courier builds requests fluently and executes them through a pluggable transport. Every way
//! of executing a request reports its outcome as an [`Either`]: the failure case carries a
//! [`TransportError`] when no response could be obtained, and the success case carries the
//! [`Response`], whatever its status code. A 404 is a successful exchange.
//!
//! ## Requests
//!
//! [`get`], [`post`], [`put`], [`patch`] and [`delete`] start a [`Request`] on the process-wide
//! default [`Client`]. The method is part of the request type, so only POST, PUT and PATCH
//! requests accept a [`Body`]. A request is a reusable template: nothing is sent until it is
//! executed, and each execution performs exactly one exchange.
//!
//! ```no_run
//! use courier::Body;
//!
//! let mut req = courier::post("http://localhost:8080/echo");
//! req.add_parameter("dry_run", "1")?
//!     .add_header("x-request-id", "42")
//!     .set_body(Body::text(r#"{"name":"x"}"#, "application/json"));
//! let response = req.execute().success_or_propagate()?;
//! assert!(response.is_successful());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Execution modes
//!
//! - [`Request::execute_optional`] blocks and discards the failure detail.
//! - [`Request::execute`] blocks and returns an [`Either`].
//! - [`Request::execute_deferred`] runs the exchange on a worker thread and returns a
//!   [`Deferred`] handle, which can be waited on or awaited.
//! - [`Request::execute_stream`] returns a [`ResponseStream`] that performs the exchange when
//!   first polled.
//!
//! [`all`] runs several requests concurrently and yields their outcomes in completion order:
//!
//! ```no_run
//! use courier::Execute;
//!
//! let a = courier::get("http://localhost:8080/a");
//! let b = courier::delete("http://localhost:8080/b");
//! for outcome in courier::all([&a as &dyn Execute, &b]).blocking() {
//!     outcome.apply_both(|e| eprintln!("failed: {e}"), |r| println!("{r}"));
//! }
//! ```
//!
//! ## Transports
//!
//! A transport performs one exchange at a time on behalf of the client, and must be safe to
//! share between threads. [`ClientBuilder::build`] uses the backend registered through
//! [`courier_interface::register_backend`], falling back to the bundled reqwest transport. Any
//! [`Transport`] can also be injected with [`Client::new`] or [`Request::set_transport`].
//!
//! ## Features
//!
//! - `json`: Enable JSON request bodies and typed response parsing.
//! - `reqwest`: Bundle the reqwest transport as the fallback backend.
//! - `multipart`: Enable multipart form bodies.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(missing_docs)]

mod body;
pub mod client;
mod deferred;
mod either;
mod error;
mod execute;
#[cfg(test)]
mod mock;
mod request;
mod response;
mod status;
mod stream;

pub use body::Body;
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub use body::{Part, PartBody};
#[doc(inline)]
pub use client::{default_client, set_default_client, Client, ClientBuilder};
pub use courier_interface::Transport;
pub use deferred::Deferred;
pub use either::Either;
#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub use error::ParseError;
pub use error::{InvalidStateError, MalformedTargetError, TransportError};
pub use request::{Delete, Execute, Get, Method, Patch, Post, Put, Request, WithPayload};
pub use response::Response;
pub use status::StatusCode;
pub use stream::{All, ResponseStream};

/// Starts a GET request on the default client.
pub fn get(target: impl Into<String>) -> Request<Get> {
    default_client().get(target)
}

/// Starts a POST request on the default client.
pub fn post(target: impl Into<String>) -> Request<Post> {
    default_client().post(target)
}

/// Starts a PUT request on the default client.
pub fn put(target: impl Into<String>) -> Request<Put> {
    default_client().put(target)
}

/// Starts a PATCH request on the default client.
pub fn patch(target: impl Into<String>) -> Request<Patch> {
    default_client().patch(target)
}

/// Starts a DELETE request on the default client.
pub fn delete(target: impl Into<String>) -> Request<Delete> {
    default_client().delete(target)
}

/// Executes every request concurrently, each on its own worker thread.
///
/// The returned stream yields one outcome per request, in completion order, then ends. Failures
/// are yielded like any other outcome.
pub fn all<I>(requests: I) -> All
where
    I: IntoIterator,
    I::Item: Execute,
{
    All::new(requests.into_iter().map(|req| req.execute_deferred()))
}
