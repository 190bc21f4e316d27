//! Proxies: plain-looking objects composed entirely of mirrors.
//!
//! - [`EntityProxy`]: methods, properties and attributes of one entity,
//!   with auto-discovery of attributes first written through the proxy.
//! - [`CollectionProxy`]: methods and properties of a collection, plus a
//!   one-time snapshot of its members wrapped in entity proxies.
//! - [`ProxyCache`]: at most one live proxy per source, keyed by identity.
//! - [`ProxyOptions`]: construction options shared by both.

pub mod cache;
pub mod collection;
pub mod entity;
pub mod options;

pub use cache::ProxyCache;
pub use collection::CollectionProxy;
pub use entity::EntityProxy;
pub use options::ProxyOptions;
