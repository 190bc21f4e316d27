//! Deferred / OperationHandle: a one-shot task with dual callbacks.
//!
//! The producer keeps the [`Deferred`] and calls `resolve`, `reject` or
//! `notify`; consumers subscribe through an [`OperationHandle`].
//!
//! Semantics:
//!   - `resolve` and `reject` are terminal and mutually exclusive; only the
//!     first one takes effect.
//!   - `notify` is non-terminal and ignored once the deferred has settled.
//!   - `done` / `fail` callbacks registered after settlement run immediately
//!     with the settled value; `progress` callbacks only see later notifies.
//!
//! No lock is held while callbacks run, so a callback may subscribe again.

use std::sync::Arc;

use parking_lot::Mutex;

type DoneFn<T> = Box<dyn FnOnce(T) + Send>;
type FailFn<E> = Box<dyn FnOnce(E) + Send>;
type ProgressFn<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Observable state of a deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    Pending,
    Resolved,
    Rejected,
}

enum Outcome<T, E> {
    Pending,
    Resolved(T),
    Rejected(E),
}

struct Shared<T, E> {
    outcome: Outcome<T, E>,
    done: Vec<DoneFn<T>>,
    fail: Vec<FailFn<E>>,
    progress: Vec<ProgressFn<T>>,
}

impl<T, E> Shared<T, E> {
    fn state(&self) -> DeferredState {
        match self.outcome {
            Outcome::Pending => DeferredState::Pending,
            Outcome::Resolved(_) => DeferredState::Resolved,
            Outcome::Rejected(_) => DeferredState::Rejected,
        }
    }
}

// ============================================================================
// Deferred: producer side
// ============================================================================

/// Producer side of a one-shot operation.
pub struct Deferred<T, E> {
    shared: Arc<Mutex<Shared<T, E>>>,
}

impl<T, E> Deferred<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                outcome: Outcome::Pending,
                done: Vec::new(),
                fail: Vec::new(),
                progress: Vec::new(),
            })),
        }
    }

    /// The consumer-facing handle for this deferred.
    pub fn handle(&self) -> OperationHandle<T, E> {
        OperationHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn state(&self) -> DeferredState {
        self.shared.lock().state()
    }

    /// Settle successfully. Returns `false` if already settled.
    pub fn resolve(&self, value: T) -> bool {
        let callbacks = {
            let mut shared = self.shared.lock();
            if !matches!(shared.outcome, Outcome::Pending) {
                tracing::warn!(state = ?shared.state(), "resolve ignored on settled deferred");
                return false;
            }
            shared.outcome = Outcome::Resolved(value.clone());
            shared.fail.clear();
            shared.progress.clear();
            std::mem::take(&mut shared.done)
        };
        for callback in callbacks {
            callback(value.clone());
        }
        true
    }

    /// Settle with a failure. Returns `false` if already settled.
    pub fn reject(&self, error: E) -> bool {
        let callbacks = {
            let mut shared = self.shared.lock();
            if !matches!(shared.outcome, Outcome::Pending) {
                tracing::warn!(state = ?shared.state(), "reject ignored on settled deferred");
                return false;
            }
            shared.outcome = Outcome::Rejected(error.clone());
            shared.done.clear();
            shared.progress.clear();
            std::mem::take(&mut shared.fail)
        };
        for callback in callbacks {
            callback(error.clone());
        }
        true
    }

    /// Report progress. Returns `false` (and does nothing) once settled.
    pub fn notify(&self, value: T) -> bool {
        let callbacks: Vec<ProgressFn<T>> = {
            let shared = self.shared.lock();
            if !matches!(shared.outcome, Outcome::Pending) {
                tracing::warn!(state = ?shared.state(), "notify ignored on settled deferred");
                return false;
            }
            shared.progress.iter().map(Arc::clone).collect()
        };
        for callback in callbacks {
            callback(&value);
        }
        true
    }
}

impl<T, E> Default for Deferred<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

// ============================================================================
// OperationHandle: consumer side
// ============================================================================

/// Consumer side of a one-shot operation: `done` / `fail` / `progress`.
///
/// Subscription methods return `&Self` so calls chain.
pub struct OperationHandle<T, E> {
    shared: Arc<Mutex<Shared<T, E>>>,
}

impl<T, E> OperationHandle<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// A handle that has already succeeded with `value`.
    pub fn resolved(value: T) -> Self {
        let deferred = Deferred::new();
        deferred.resolve(value);
        deferred.handle()
    }

    /// A handle that has already failed with `error`.
    pub fn rejected(error: E) -> Self {
        let deferred = Deferred::new();
        deferred.reject(error);
        deferred.handle()
    }

    pub fn state(&self) -> DeferredState {
        self.shared.lock().state()
    }

    pub fn done(&self, callback: impl FnOnce(T) + Send + 'static) -> &Self {
        let ready = {
            let mut guard = self.shared.lock();
            let shared = &mut *guard;
            match &shared.outcome {
                Outcome::Pending => {
                    shared.done.push(Box::new(callback));
                    return self;
                }
                Outcome::Resolved(value) => Some((value.clone(), callback)),
                Outcome::Rejected(_) => None,
            }
        };
        if let Some((value, callback)) = ready {
            callback(value);
        }
        self
    }

    pub fn fail(&self, callback: impl FnOnce(E) + Send + 'static) -> &Self {
        let ready = {
            let mut guard = self.shared.lock();
            let shared = &mut *guard;
            match &shared.outcome {
                Outcome::Pending => {
                    shared.fail.push(Box::new(callback));
                    return self;
                }
                Outcome::Rejected(error) => Some((error.clone(), callback)),
                Outcome::Resolved(_) => None,
            }
        };
        if let Some((error, callback)) = ready {
            callback(error);
        }
        self
    }

    pub fn progress(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> &Self {
        let mut shared = self.shared.lock();
        if matches!(shared.outcome, Outcome::Pending) {
            shared.progress.push(Arc::new(callback));
        }
        self
    }
}

impl<T, E> Clone for OperationHandle<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> std::fmt::Debug for OperationHandle<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationHandle")
            .field("state", &self.shared.lock().state())
            .finish()
    }
}
