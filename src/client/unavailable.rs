use std::fmt;

use courier_interface::{Error as ErrorImpl, RawResponse, Request as RequestImpl, Transport};

/// Stands in for the default transport when none could be built.
pub(super) struct UnavailableTransport {
    reason: String,
}

impl UnavailableTransport {
    pub(super) fn new(reason: String) -> Self {
        Self { reason }
    }
}

pub(super) enum NoResponse {}

impl Transport for UnavailableTransport {
    type Response = NoResponse;

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnavailableTransport({})", self.reason)
    }

    fn exchange(&self, _req: RequestImpl) -> courier_interface::Result<NoResponse> {
        Err(ErrorImpl::Unavailable(self.reason.clone()))
    }
}

impl RawResponse for NoResponse {
    fn status(&self) -> u16 {
        match *self {}
    }

    fn headers(&self) -> Vec<(String, String)> {
        match *self {}
    }

    fn content_length(&self) -> Option<u64> {
        match *self {}
    }

    fn bytes(&mut self) -> courier_interface::Result<Vec<u8>> {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Client, TransportError};

    #[test]
    fn every_exchange_fails() {
        let client = Client::new(UnavailableTransport::new("no backend".into()));
        let failure = client.get("http://127.0.0.1/").execute();
        assert!(matches!(
            failure.peek_failure(),
            Ok(TransportError::Unavailable(reason)) if reason == "no backend"
        ));
        assert!(client.post("http://127.0.0.1/").execute_optional().is_none());
    }
}
