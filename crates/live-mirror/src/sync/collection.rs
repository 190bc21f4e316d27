//! CollectionWithSync: the collection counterpart of `EntityWithSync`.

use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use crate::{
    promise::ResultTranslator,
    proxy::{CollectionProxy, ProxyCache},
    source::Collection,
};

use super::types::{SyncMethod, SyncOptions, SyncPromise, SyncRequest, SyncTransport};

pub struct CollectionWithSync {
    collection: Arc<Collection>,
    transport: Arc<dyn SyncTransport>,
    translator: ResultTranslator,
    proxies: Arc<ProxyCache>,
    options: SyncOptions,
    proxy: OnceLock<Arc<CollectionProxy>>,
}

impl CollectionWithSync {
    pub fn new(
        collection: Arc<Collection>,
        transport: Arc<dyn SyncTransport>,
        translator: ResultTranslator,
        proxies: Arc<ProxyCache>,
        options: SyncOptions,
    ) -> Self {
        Self {
            collection,
            transport,
            translator,
            proxies,
            options,
            proxy: OnceLock::new(),
        }
    }

    pub fn collection(&self) -> &Arc<Collection> {
        &self.collection
    }

    /// The collection's `url` property, falling back to the configured root.
    pub fn url(&self) -> Option<String> {
        self.collection
            .properties()
            .get_str("url")
            .or_else(|| self.options.url_root.clone())
    }

    pub fn sync(&self, method: SyncMethod) -> SyncPromise {
        let request = SyncRequest {
            method,
            url: self.url(),
            payload: method.carries_payload().then(|| self.collection.to_json()),
        };
        tracing::debug!(method = %method, url = ?request.url, "collection sync");
        self.translator.translate(self.transport.sync(request))
    }

    pub fn fetch(&self) -> SyncPromise {
        self.sync(SyncMethod::Read)
    }

    /// The proxy for this collection, shared through the cache. Its member
    /// sequence is the one the collection had when the proxy was built.
    pub fn proxy(&self) -> Arc<CollectionProxy> {
        let proxy = self
            .proxy
            .get_or_init(|| self.proxies.collection(&self.collection, &self.options.proxy));
        Arc::clone(proxy)
    }
}

impl Deref for CollectionWithSync {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.collection
    }
}

impl std::fmt::Debug for CollectionWithSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionWithSync")
            .field("collection", &self.collection)
            .field("proxied", &self.proxy.get().is_some())
            .finish()
    }
}
