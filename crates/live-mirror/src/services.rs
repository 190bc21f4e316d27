//! Services: the single place where the bridge is wired together.
//!
//! Builds the translator, proxifier and proxy cache once and hands out
//! synced wrappers and proxies configured from the same [`SyncOptions`].
//! Every proxy handed out goes through the one [`ProxyCache`], so a source
//! object has a single live proxy however it is reached.

use std::sync::Arc;

use crate::{
    mirror::Proxifier,
    promise::ResultTranslator,
    proxy::{CollectionProxy, EntityProxy, ProxyCache},
    source::{Collection, Entity},
    sync::{CollectionWithSync, EntityWithSync, SyncOptions, SyncTransport},
};

pub struct Services {
    transport: Arc<dyn SyncTransport>,
    translator: ResultTranslator,
    proxifier: Proxifier,
    proxies: Arc<ProxyCache>,
    options: SyncOptions,
}

impl Services {
    pub fn new(transport: Arc<dyn SyncTransport>, options: SyncOptions) -> Self {
        Self {
            transport,
            translator: ResultTranslator::new(),
            proxifier: Proxifier::new(),
            proxies: Arc::new(ProxyCache::new()),
            options,
        }
    }

    pub fn translator(&self) -> &ResultTranslator {
        &self.translator
    }

    pub fn proxifier(&self) -> &Proxifier {
        &self.proxifier
    }

    pub fn proxies(&self) -> &Arc<ProxyCache> {
        &self.proxies
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Wrap `entity` so its sync is translated and its proxy memoized.
    pub fn entity(&self, entity: Entity) -> EntityWithSync {
        self.entity_from(Arc::new(entity))
    }

    pub fn entity_from(&self, entity: Arc<Entity>) -> EntityWithSync {
        EntityWithSync::new(
            entity,
            Arc::clone(&self.transport),
            self.translator,
            Arc::clone(&self.proxies),
            self.options.clone(),
        )
    }

    pub fn collection(&self, collection: Collection) -> CollectionWithSync {
        self.collection_from(Arc::new(collection))
    }

    pub fn collection_from(&self, collection: Arc<Collection>) -> CollectionWithSync {
        CollectionWithSync::new(
            collection,
            Arc::clone(&self.transport),
            self.translator,
            Arc::clone(&self.proxies),
            self.options.clone(),
        )
    }

    /// The cached proxy for `entity`, shared with every synced wrapper over it.
    pub fn entity_proxy(&self, entity: &Arc<Entity>) -> Arc<EntityProxy> {
        self.proxies.entity(entity, &self.options.proxy)
    }

    /// The cached proxy for `collection`.
    pub fn collection_proxy(&self, collection: &Arc<Collection>) -> Arc<CollectionProxy> {
        self.proxies.collection(collection, &self.options.proxy)
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("proxies", &self.proxies)
            .field("options", &self.options)
            .finish()
    }
}
