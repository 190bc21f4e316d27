//! ResultTranslator: operation handle → [`Promise`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::events::EventEmitter;

use super::{OperationHandle, Promise};

type SettleSlot<T, E> = Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>;

/// Adapts dual-callback operation handles into settle-once promises.
///
/// Stateless; one instance can translate any number of handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultTranslator;

impl ResultTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Subscribe once to each channel of `handle` and return the promise
    /// that settles with its first terminal outcome.
    ///
    /// The success value and the failure value are passed through unchanged.
    pub fn translate<T, E>(&self, handle: OperationHandle<T, E>) -> Promise<T, E>
    where
        T: Clone + Send + 'static,
        E: Clone + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let slot: SettleSlot<T, E> = Arc::new(Mutex::new(Some(tx)));
        let progress = Arc::new(EventEmitter::new());

        {
            let slot = Arc::clone(&slot);
            handle.done(move |value| settle(&slot, Ok(value)));
        }
        handle.fail(move |error| settle(&slot, Err(error)));
        {
            let progress = Arc::clone(&progress);
            handle.progress(move |value| progress.emit(value));
        }

        Promise::new(rx, progress)
    }
}

fn settle<T, E>(slot: &SettleSlot<T, E>, outcome: Result<T, E>) {
    // The sender is taken on first use; a second outcome finds the slot empty.
    if let Some(tx) = slot.lock().take() {
        // A dropped promise is not an error for the operation.
        let _ = tx.send(outcome);
    }
}
