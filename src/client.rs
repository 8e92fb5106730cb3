//! HTTP clients and the process-wide default client.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use courier_interface::{AnyTransport, Transport};

use crate::request::{Delete, Get, Patch, Post, Put, Request};

mod builder;
mod error;
mod unavailable;

pub use builder::ClientBuilder;
pub use error::{BuildClientError, BuildClientResult};

/// A handle on one transport that requests are executed with.
///
/// Depending on the transport, it might hold a connection pool or a runtime internally, so it is
/// advised that you create one and reuse it. Cloning is cheap; clones share the transport.
///
/// # Thread safety
///
/// The client is thread-safe and can be shared between threads. Requests built from it may be
/// executed from multiple threads concurrently.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn AnyTransport>,
}

impl Client {
    /// Creates a client performing exchanges with `transport`.
    pub fn new(transport: impl Transport) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub(crate) fn from_any(transport: Arc<dyn AnyTransport>) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &dyn AnyTransport {
        &*self.transport
    }

    /// Starts a GET request to `target`.
    pub fn get(&self, target: impl Into<String>) -> Request<Get> {
        Request::new(target, self.clone())
    }

    /// Starts a POST request to `target`.
    pub fn post(&self, target: impl Into<String>) -> Request<Post> {
        Request::new(target, self.clone())
    }

    /// Starts a PUT request to `target`.
    pub fn put(&self, target: impl Into<String>) -> Request<Put> {
        Request::new(target, self.clone())
    }

    /// Starts a PATCH request to `target`.
    pub fn patch(&self, target: impl Into<String>) -> Request<Patch> {
        Request::new(target, self.clone())
    }

    /// Starts a DELETE request to `target`.
    pub fn delete(&self, target: impl Into<String>) -> Request<Delete> {
        Request::new(target, self.clone())
    }
}

struct TransportDebug<'a> {
    inner: &'a dyn AnyTransport,
}

impl fmt::Debug for TransportDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.describe(f)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field(
                "transport",
                &TransportDebug {
                    inner: &*self.transport,
                },
            )
            .finish()
    }
}

static DEFAULT_CLIENT: RwLock<Option<Client>> = RwLock::new(None);

/// Returns the process-wide default client.
///
/// Built on first use from [`ClientBuilder::default`]. If no transport can be built, the default
/// client fails every exchange with [`crate::TransportError::Unavailable`].
pub fn default_client() -> Client {
    if let Some(client) = &*DEFAULT_CLIENT.read().unwrap_or_else(PoisonError::into_inner) {
        return client.clone();
    }
    DEFAULT_CLIENT
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(build_default_client)
        .clone()
}

/// Replaces the process-wide default client.
///
/// Requests created afterwards by [`crate::get`] and friends use `client`; requests already
/// built keep theirs.
pub fn set_default_client(client: Client) {
    tracing::debug!(?client, "default client replaced");
    *DEFAULT_CLIENT.write().unwrap_or_else(PoisonError::into_inner) = Some(client);
}

fn build_default_client() -> Client {
    match ClientBuilder::default().build() {
        Ok(client) => {
            tracing::debug!(?client, "default client built");
            client
        }
        Err(e) => {
            tracing::warn!(error = %e, "no transport available for the default client");
            Client::new(unavailable::UnavailableTransport::new(e.to_string()))
        }
    }
}
