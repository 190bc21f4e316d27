//! Promise: the settle-once future produced by [`ResultTranslator`].
//!
//! [`ResultTranslator`]: super::ResultTranslator

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::events::{EventEmitter, ListenerId};

/// A single-settlement result with progress notifications.
///
/// Awaiting yields `Ok(value)` or `Err(error)` exactly as delivered by the
/// underlying operation. If the operation is dropped without ever settling,
/// the promise stays pending forever; callers that need a deadline race it
/// (e.g. with `tokio::time::timeout`).
///
/// Progress notifications emitted before a listener is registered are not
/// replayed.
#[must_use = "a promise does nothing unless awaited or inspected"]
pub struct Promise<T, E> {
    settled: oneshot::Receiver<Result<T, E>>,
    progress: Arc<EventEmitter<T>>,
    abandoned: bool,
}

impl<T, E> Promise<T, E> {
    pub(crate) fn new(
        settled: oneshot::Receiver<Result<T, E>>,
        progress: Arc<EventEmitter<T>>,
    ) -> Self {
        Self {
            settled,
            progress,
            abandoned: false,
        }
    }

    /// Register a progress listener. It is called synchronously, on the
    /// notifying thread, for every progress value reported before settlement.
    pub fn on_progress(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        self.progress.on(listener)
    }

    /// Remove a progress listener.
    pub fn off_progress(&self, id: ListenerId) -> bool {
        self.progress.off(id)
    }
}

impl<T, E> Future for Promise<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.abandoned {
            return Poll::Pending;
        }
        match Pin::new(&mut this.settled).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => {
                // The operation can no longer settle.
                this.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, E> std::fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Promise")
            .field("progress_listeners", &self.progress.len())
            .field("abandoned", &self.abandoned)
            .finish()
    }
}
