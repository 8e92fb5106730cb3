use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::{block_on_stream, BlockingStream};
use futures::stream::{FusedStream, FuturesUnordered, Stream, StreamExt};

use crate::deferred::Deferred;
use crate::either::Either;
use crate::error::TransportError;
use crate::execute::Exchange;
use crate::response::Response;

/// A stream performing one exchange, returned by [`crate::Request::execute_stream`].
///
/// Nothing is sent until the stream is first polled. It then yields `Ok(response)` or
/// `Err(transport_error)` exactly once and ends.
#[must_use = "streams do nothing unless polled"]
pub struct ResponseStream {
    state: StreamState,
}

type PrepareExchange = Box<dyn FnOnce() -> Exchange + Send>;

enum StreamState {
    Idle(PrepareExchange),
    Running(Deferred),
    Finished,
}

impl ResponseStream {
    /// `prepare` is called on the first poll, so the request body is only taken then.
    pub(crate) fn new(prepare: impl FnOnce() -> Exchange + Send + 'static) -> Self {
        Self {
            state: StreamState::Idle(Box::new(prepare)),
        }
    }

    /// Turns this stream into an iterator blocking the current thread on each item.
    pub fn blocking(self) -> BlockingStream<Self> {
        block_on_stream(self)
    }
}

impl Stream for ResponseStream {
    type Item = Result<Response, TransportError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match mem::replace(&mut self.state, StreamState::Finished) {
                StreamState::Idle(prepare) => {
                    self.state = StreamState::Running(Deferred::spawn(prepare()));
                }
                StreamState::Running(mut deferred) => {
                    return match Pin::new(&mut deferred).poll(cx) {
                        Poll::Ready(outcome) => Poll::Ready(Some(outcome.success_or_propagate())),
                        Poll::Pending => {
                            self.state = StreamState::Running(deferred);
                            Poll::Pending
                        }
                    };
                }
                StreamState::Finished => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            StreamState::Finished => (0, Some(0)),
            _ => (1, Some(1)),
        }
    }
}

impl FusedStream for ResponseStream {
    fn is_terminated(&self) -> bool {
        matches!(self.state, StreamState::Finished)
    }
}

/// The outcomes of several concurrent exchanges, in completion order.
///
/// Returned by [`crate::all`]. Every exchange yields exactly one item; a transport failure is an
/// item like any other and does not end the stream.
#[must_use = "streams do nothing unless polled"]
pub struct All {
    pending: FuturesUnordered<Deferred>,
}

impl All {
    pub(crate) fn new(deferred: impl IntoIterator<Item = Deferred>) -> Self {
        Self {
            pending: deferred.into_iter().collect(),
        }
    }

    /// Number of outcomes not yet yielded.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Turns this stream into an iterator blocking the current thread on each item.
    pub fn blocking(self) -> BlockingStream<Self> {
        block_on_stream(self)
    }
}

impl Stream for All {
    type Item = Either<TransportError, Response>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.pending.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pending.len();
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::mock::MockTransport;
    use crate::request::Execute;
    use crate::{Body, Client};

    #[test]
    fn stream_is_lazy() {
        let transport = MockTransport::default();
        let stream = Client::new(transport.clone())
            .get("http://example.test/")
            .execute_stream();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(transport.exchanges(), 0);

        let items: Vec<_> = stream.blocking().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
        assert_eq!(transport.exchanges(), 1);
    }

    #[test]
    fn unpolled_stream_leaves_body_in_place() {
        let transport = MockTransport::default();
        let req = Client::new(transport.clone())
            .post("http://example.test/")
            .with_body(Body::stream(Cursor::new(b"payload".to_vec()), "text/plain"));
        drop(req.execute_stream());
        assert_eq!(transport.exchanges(), 0);

        req.execute().unwrap_success().unwrap();
        assert_eq!(transport.recorded()[0].body, b"payload");
    }

    #[test]
    fn each_stream_runs_its_own_exchange() {
        let transport = MockTransport::default();
        let req = Client::new(transport.clone()).get("http://example.test/");
        for _ in 0..2 {
            assert_eq!(req.execute_stream().blocking().count(), 1);
        }
        assert_eq!(transport.exchanges(), 2);
    }

    #[test]
    fn stream_ends_with_error_on_failure() {
        let mut stream = Client::new(MockTransport::default())
            .get("http://unreachable/")
            .execute_stream()
            .blocking();
        assert!(matches!(stream.next(), Some(Err(TransportError::Io(_)))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn all_yields_every_outcome_once() {
        let transport = MockTransport::default();
        let client = Client::new(transport.clone());
        let r1 = client.get("http://example.test/1");
        let r2 = client.get("http://unreachable/2");
        let r3 = client.post("http://example.test/3");
        let requests: [&dyn Execute; 3] = [&r1, &r2, &r3];

        let all = All::new(requests.iter().map(|r| r.execute_deferred()));
        assert_eq!(all.remaining(), 3);
        let outcomes: Vec<_> = all.blocking().collect();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().filter(|o| o.is_failure()).count(), 1);

        let mut uris: Vec<_> = transport.recorded().into_iter().map(|r| r.uri).collect();
        uris.sort();
        assert_eq!(
            uris,
            ["http://example.test/1", "http://example.test/3", "http://unreachable/2"]
        );
    }

    #[test]
    fn all_of_nothing_is_empty() {
        let mut all = All::new(std::iter::empty());
        assert_eq!(all.size_hint(), (0, Some(0)));
        assert!(futures::executor::block_on(all.next()).is_none());
    }
}
