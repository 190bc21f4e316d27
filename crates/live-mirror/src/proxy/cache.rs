//! ProxyCache: at most one live proxy per source object.
//!
//! Entries are keyed by the address of the source `Arc` and hold the proxy
//! weakly. A proxy keeps its source alive, so while an entry upgrades its
//! address cannot have been reused by another source.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::source::{Collection, Entity};

use super::{collection::CollectionProxy, entity::EntityProxy, options::ProxyOptions};

type Slots<P> = Mutex<HashMap<usize, Weak<P>>>;

#[derive(Default)]
pub struct ProxyCache {
    entities: Slots<EntityProxy>,
    collections: Slots<CollectionProxy>,
}

impl ProxyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live proxy for `entity`, or a new one built with `options`.
    ///
    /// `options` only apply when a proxy is built; a live proxy is returned
    /// as it was configured.
    pub fn entity(&self, entity: &Arc<Entity>, options: &ProxyOptions) -> Arc<EntityProxy> {
        lookup_or_build(&self.entities, entity, || {
            EntityProxy::with_options(Arc::clone(entity), options)
        })
    }

    /// The live proxy for `collection`, or a new one built with `options`.
    /// A reused proxy keeps the member snapshot taken when it was built.
    pub fn collection(
        &self,
        collection: &Arc<Collection>,
        options: &ProxyOptions,
    ) -> Arc<CollectionProxy> {
        lookup_or_build(&self.collections, collection, || {
            CollectionProxy::with_options(Arc::clone(collection), options)
        })
    }

    /// Number of entity proxies still alive.
    pub fn live_entities(&self) -> usize {
        live(&self.entities)
    }

    /// Number of collection proxies still alive.
    pub fn live_collections(&self) -> usize {
        live(&self.collections)
    }
}

fn lookup_or_build<S, P>(slots: &Slots<P>, source: &Arc<S>, build: impl FnOnce() -> P) -> Arc<P> {
    let key = Arc::as_ptr(source) as usize;
    let mut slots = slots.lock();
    if let Some(proxy) = slots.get(&key).and_then(Weak::upgrade) {
        return proxy;
    }
    slots.retain(|_, proxy| proxy.strong_count() > 0);
    let proxy = Arc::new(build());
    slots.insert(key, Arc::downgrade(&proxy));
    tracing::trace!(cached = slots.len(), "proxy cache miss");
    proxy
}

fn live<P>(slots: &Slots<P>) -> usize {
    slots
        .lock()
        .values()
        .filter(|proxy| proxy.strong_count() > 0)
        .count()
}

impl std::fmt::Debug for ProxyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyCache")
            .field("entities", &self.live_entities())
            .field("collections", &self.live_collections())
            .finish()
    }
}
