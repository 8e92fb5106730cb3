use std::fmt;

use courier_interface::{AnyRawResponse, AnyTransport, Request as RequestImpl};

use crate::client::Client;
use crate::either::Either;
use crate::error::TransportError;
use crate::response::Response;

/// One exchange, prepared from a request template and ready to run anywhere.
pub(crate) struct Exchange {
    client: Client,
    request: RequestImpl,
}

impl Exchange {
    pub(crate) fn new(client: Client, request: RequestImpl) -> Self {
        Self { client, request }
    }

    /// Performs the exchange exactly once.
    pub(crate) fn run(self) -> Either<TransportError, Response> {
        let method = self.request.method;
        let uri = self.request.uri.clone();
        tracing::debug!(%method, %uri, "dispatching exchange");

        match exchange(self.client.transport(), self.request) {
            Ok(response) => {
                tracing::debug!(%method, %uri, status = %response.status(), "exchange completed");
                Either::Success(response)
            }
            Err(e) => {
                let e = TransportError::from(e);
                tracing::debug!(%method, %uri, error = %e, "exchange failed");
                Either::Failure(e)
            }
        }
    }
}

/// The raw response is dropped, releasing its connection, before this returns.
fn exchange(
    transport: &dyn AnyTransport,
    request: RequestImpl,
) -> courier_interface::Result<Response> {
    let mut raw = transport.exchange(request)?;
    tracing::trace!(
        response = %RawDescription(&*raw),
        content_length = ?raw.content_length(),
        "response head received"
    );
    let status = raw.status();
    let headers = raw.headers();
    let content = raw.bytes()?;
    Ok(Response::new(status, headers, content))
}

struct RawDescription<'a>(&'a dyn AnyRawResponse);

impl fmt::Display for RawDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.describe(f)
    }
}
