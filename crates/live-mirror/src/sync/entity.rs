//! EntityWithSync: an entity whose sync goes through the translator and
//! which hands out the one proxy cached for its entity.

use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use crate::{
    promise::ResultTranslator,
    proxy::{EntityProxy, ProxyCache},
    source::Entity,
};

use super::types::{join_url, SyncMethod, SyncOptions, SyncPromise, SyncRequest, SyncTransport};

pub struct EntityWithSync {
    entity: Arc<Entity>,
    transport: Arc<dyn SyncTransport>,
    translator: ResultTranslator,
    proxies: Arc<ProxyCache>,
    options: SyncOptions,
    proxy: OnceLock<Arc<EntityProxy>>,
}

impl EntityWithSync {
    pub fn new(
        entity: Arc<Entity>,
        transport: Arc<dyn SyncTransport>,
        translator: ResultTranslator,
        proxies: Arc<ProxyCache>,
        options: SyncOptions,
    ) -> Self {
        Self {
            entity,
            transport,
            translator,
            proxies,
            options,
            proxy: OnceLock::new(),
        }
    }

    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    /// Resource URL: the entity's `url` property if set, otherwise its
    /// `urlRoot` property (or the configured root) joined with the id.
    pub fn url(&self) -> Option<String> {
        let properties = self.entity.properties();
        if let Some(url) = properties.get_str("url") {
            return Some(url);
        }
        let root = properties
            .get_str("urlRoot")
            .or_else(|| self.options.url_root.clone())?;
        Some(match self.entity.id() {
            Some(id) => join_url(&root, &id),
            None => root,
        })
    }

    /// Issue `method` through the transport and translate the handle.
    pub fn sync(&self, method: SyncMethod) -> SyncPromise {
        let request = SyncRequest {
            method,
            url: self.url(),
            payload: method.carries_payload().then(|| self.entity.to_json()),
        };
        tracing::debug!(
            cid = %self.entity.cid(),
            method = %method,
            url = ?request.url,
            "entity sync"
        );
        self.translator.translate(self.transport.sync(request))
    }

    pub fn fetch(&self) -> SyncPromise {
        self.sync(SyncMethod::Read)
    }

    /// `create` for a new entity, `update` otherwise.
    pub fn save(&self) -> SyncPromise {
        if self.entity.is_new() {
            self.sync(SyncMethod::Create)
        } else {
            self.sync(SyncMethod::Update)
        }
    }

    pub fn destroy(&self) -> SyncPromise {
        self.sync(SyncMethod::Delete)
    }

    /// The proxy for this entity. Every wrapper sharing the cache and the
    /// entity gets the same proxy; this wrapper keeps it alive once asked.
    pub fn proxy(&self) -> Arc<EntityProxy> {
        let proxy = self
            .proxy
            .get_or_init(|| self.proxies.entity(&self.entity, &self.options.proxy));
        Arc::clone(proxy)
    }
}

impl Deref for EntityWithSync {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.entity
    }
}

impl std::fmt::Debug for EntityWithSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityWithSync")
            .field("entity", &self.entity)
            .field("proxied", &self.proxy.get().is_some())
            .finish()
    }
}
