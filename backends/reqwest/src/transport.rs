use std::fmt;
use std::future::Future;
use std::sync::OnceLock;

use courier_interface::client::TransportOptions;
use courier_interface::{RawResponse, Request, Result as CourierResult, Transport};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::client::ReqwestClient;
use crate::error::ReqwestBackendError;
use crate::response::ReqwestResponse;

/// A transport performing exchanges with reqwest.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: ReqwestClient,
}

impl ReqwestTransport {
    /// Creates a transport honouring the given options.
    pub fn new(options: TransportOptions) -> CourierResult<Self> {
        let inner = ReqwestClient::new(options)?;
        Ok(Self { inner })
    }
}

impl Transport for ReqwestTransport {
    type Response = ReqwestRawResponse;

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReqwestTransport")
    }

    fn exchange(&self, req: Request) -> CourierResult<Self::Response> {
        let request_builder = crate::request::build_request(&self.inner.client, req)?;
        let response = execute_with_runtime(move || async move { request_builder.send().await })
            .map_err(ReqwestBackendError::Reqwest)?;

        Ok(ReqwestRawResponse {
            response: ReqwestResponse::new(response, self.inner.max_response_buffer_size),
        })
    }
}

/// A response received by [`ReqwestTransport`].
///
/// Holds the underlying connection until dropped.
pub struct ReqwestRawResponse {
    response: ReqwestResponse,
}

impl RawResponse for ReqwestRawResponse {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReqwestRawResponse(status: {})", self.status())
    }

    fn status(&self) -> u16 {
        self.response.status()
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.response.headers()
    }

    fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    fn bytes(&mut self) -> CourierResult<Vec<u8>> {
        let response = &mut self.response;
        Ok(execute_with_runtime(|| response.collect_all_bytes())?)
    }
}

/// The runtime driving exchanges issued from outside of tokio.
///
/// Lives for the whole process so that it is never dropped from within an async context.
fn managed_runtime() -> &'static Runtime {
    static MANAGED_RUNTIME: OnceLock<Runtime> = OnceLock::new();
    MANAGED_RUNTIME.get_or_init(|| {
        tracing::trace!("creating managed tokio runtime for reqwest transport");
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("courier-reqwest")
            .build()
            .expect("Failed to create managed tokio runtime")
    })
}

/// Drives `task` to completion from blocking code.
///
/// - Inside a multi-thread runtime: `block_in_place` on the current handle.
/// - Inside a current-thread runtime: a scoped helper thread blocks on the managed runtime.
/// - Outside any runtime: block on the managed runtime directly.
fn execute_with_runtime<F, Fut, T>(task: F) -> T
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = T>,
    T: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(task()))
        }
        Ok(_) => std::thread::scope(|s| {
            let helper = s.spawn(|| managed_runtime().block_on(task()));
            match helper.join() {
                Ok(output) => output,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }),
        Err(_) => managed_runtime().block_on(task()),
    }
}
