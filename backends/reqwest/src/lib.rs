//! reqwest transport backend for courier.
//!
//! Exchanges are performed by an async [`reqwest::Client`] and bridged back to the blocking
//! [`Transport`] contract. Outside of a tokio runtime a process-wide runtime drives the request;
//! inside one the current runtime is reused where that is allowed.
//!
//! Call [`register`] once at startup to make this backend the process-wide default, or create a
//! [`ReqwestTransport`] directly and hand it to a courier client.
//!
//! [`Transport`]: courier_interface::Transport

#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
mod error;
mod request;
mod response;
mod transport;

use courier_interface::client::TransportOptions;
use courier_interface::{register_backend, Result};

pub use error::ReqwestBackendError;
pub use transport::{ReqwestRawResponse, ReqwestTransport};

/// The backend implementation using reqwest.
pub struct ReqwestBackend;

impl courier_interface::Backend for ReqwestBackend {
    type Transport = ReqwestTransport;

    fn create_transport(&self, options: TransportOptions) -> Result<Self::Transport> {
        ReqwestTransport::new(options)
    }
}

/// Registers the reqwest backend as global default.
pub fn register() {
    register_backend(ReqwestBackend);
}
