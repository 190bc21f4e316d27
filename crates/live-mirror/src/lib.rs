//! Live mirror proxies over synced entities and collections.
//!
//! An [`EntityProxy`] or [`CollectionProxy`] looks like a plain object: a
//! set of named members that can be read, written and called. Every member
//! forwards to the underlying [`Entity`] / [`Collection`]; no value is ever
//! copied. Sync operations return dual-callback [`OperationHandle`]s that
//! [`ResultTranslator`] turns into awaitable [`Promise`]s.
//!
//! [`Services`] is the composition root that wires the pieces together.

pub mod error;
pub mod events;
pub mod mirror;
pub mod promise;
pub mod proxy;
pub mod services;
pub mod source;
pub mod sync;

pub use error::{MirrorError, Result, ValidationError};
pub use mirror::{AttributeMirror, Members, MethodMirror, PropertyMirror, Proxifier};
pub use promise::{Deferred, DeferredState, OperationHandle, Promise, ResultTranslator};
pub use proxy::{CollectionProxy, EntityProxy, ProxyCache, ProxyOptions};
pub use services::Services;
pub use source::{Collection, Entity, Prototype};
pub use sync::{
    CollectionWithSync, EntityWithSync, SyncMethod, SyncOptions, SyncPromise, SyncRequest,
    SyncTransport, SyncTransportError,
};
