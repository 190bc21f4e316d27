pub mod collection;
pub mod entity;
pub mod types;

pub use collection::CollectionWithSync;
pub use entity::EntityWithSync;
pub use types::{
    SyncErrorKind, SyncMethod, SyncOptions, SyncPromise, SyncRequest, SyncTransport,
    SyncTransportError,
};
