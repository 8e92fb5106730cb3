use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

use futures::channel::oneshot;

use crate::either::Either;
use crate::error::TransportError;
use crate::execute::Exchange;
use crate::response::Response;

/// A handle on an exchange running on a worker thread.
///
/// Resolves to the outcome of the exchange, either by blocking with [`Deferred::wait`] or by
/// awaiting it as a [`Future`] on any executor. Dropping the handle does not cancel the exchange.
#[must_use = "the outcome of the exchange is lost unless the handle is waited on"]
pub struct Deferred {
    receiver: oneshot::Receiver<Either<TransportError, Response>>,
    done: Arc<AtomicBool>,
}

/// Marks the exchange done when the worker exits, even by unwinding.
struct DoneGuard(Arc<AtomicBool>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

impl Deferred {
    pub(crate) fn spawn(exchange: Exchange) -> Self {
        let (sender, receiver) = oneshot::channel();
        let done = Arc::new(AtomicBool::new(false));
        let guard = DoneGuard(done.clone());
        let spawned = thread::Builder::new()
            .name("courier-exchange".into())
            .spawn(move || {
                let _guard = guard;
                // The handle may already be gone.
                let _ = sender.send(exchange.run());
            });
        match spawned {
            Ok(_) => Self { receiver, done },
            Err(e) => {
                tracing::warn!(error = %e, "failed to spawn exchange worker");
                Self::ready(Either::Failure(TransportError::Io(e)))
            }
        }
    }

    fn ready(outcome: Either<TransportError, Response>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(outcome);
        Self {
            receiver,
            done: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns `true` once the exchange has finished, successfully or not.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Blocks the current thread until the exchange finishes.
    pub fn wait(self) -> Either<TransportError, Response> {
        futures::executor::block_on(self)
    }
}

impl Future for Deferred {
    type Output = Either<TransportError, Response>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|res| {
            res.unwrap_or_else(|oneshot::Canceled| {
                Either::Failure(TransportError::Io(io::Error::other(
                    "exchange worker exited before delivering a result",
                )))
            })
        })
    }
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("done", &self.is_done())
            .finish()
    }
}
