//! Operation handles and their translation into settle-once promises.
//!
//! # Overview
//!
//! A sync transport hands back an [`OperationHandle`]: the read side of a
//! [`Deferred`], with three subscription channels (`done`, `fail`,
//! `progress`). [`ResultTranslator`] subscribes to all three exactly once and
//! returns a [`Promise`]: a `Future` that settles with the first terminal
//! outcome and forwards progress notifications to its listeners.
//!
//! # Modules
//!
//! - [`deferred`]: [`Deferred`] / [`OperationHandle`] / [`DeferredState`].
//! - [`future`]: [`Promise`].
//! - [`translator`]: [`ResultTranslator`].

pub mod deferred;
pub mod future;
pub mod translator;

pub use deferred::{Deferred, DeferredState, OperationHandle};
pub use future::Promise;
pub use translator::ResultTranslator;
