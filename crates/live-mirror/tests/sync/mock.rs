#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::Value;

use live_mirror::promise::{Deferred, OperationHandle};
use live_mirror::{SyncRequest, SyncTransport, SyncTransportError};

/// Transport that records every request and leaves settlement to the test.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<SyncRequest>>,
    pending: Mutex<Vec<Deferred<Value, SyncTransportError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<SyncRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<SyncRequest> {
        self.requests.lock().last().cloned()
    }

    /// Deferred behind the `index`-th request.
    pub fn deferred(&self, index: usize) -> Deferred<Value, SyncTransportError> {
        self.pending.lock()[index].clone()
    }

    pub fn resolve(&self, index: usize, value: Value) -> bool {
        self.deferred(index).resolve(value)
    }

    pub fn reject(&self, index: usize, error: SyncTransportError) -> bool {
        self.deferred(index).reject(error)
    }

    /// Drop every pending deferred without settling it.
    pub fn abandon_all(&self) {
        self.pending.lock().clear();
    }
}

impl SyncTransport for MockTransport {
    fn sync(&self, request: SyncRequest) -> OperationHandle<Value, SyncTransportError> {
        let deferred = Deferred::new();
        let handle = deferred.handle();
        self.requests.lock().push(request);
        self.pending.lock().push(deferred);
        handle
    }
}
