//! CollectionProxy: methods and properties of a collection, plus a frozen
//! sequence of entity proxies.
//!
//! The member sequence is taken once, at construction. Entities added to or
//! removed from the collection afterwards do not appear in (or disappear
//! from) the proxy's `models()`; the entities that are in it stay live.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::Result,
    mirror::{Members, Proxifier},
    source::{Collection, Entity},
};

use super::{entity::EntityProxy, options::ProxyOptions};

pub struct CollectionProxy {
    original: Arc<Collection>,
    original_models: Vec<Arc<Entity>>,
    members: Members,
    models: Vec<EntityProxy>,
}

impl CollectionProxy {
    pub fn new(collection: Arc<Collection>) -> Self {
        Self::with_options(collection, &ProxyOptions::default())
    }

    pub fn with_options(collection: Arc<Collection>, options: &ProxyOptions) -> Self {
        let original_models = collection.models();

        let proxifier = Proxifier::new();
        let members = Members::new();
        proxifier.install_methods(&members, &collection);
        proxifier.install_properties(&members, &collection);

        let models: Vec<EntityProxy> = original_models
            .iter()
            .map(|entity| EntityProxy::with_options(Arc::clone(entity), options))
            .collect();

        tracing::debug!(
            models = models.len(),
            members = members.len(),
            "collection proxy constructed"
        );

        Self {
            original: collection,
            original_models,
            members,
            models,
        }
    }

    pub fn original(&self) -> &Arc<Collection> {
        &self.original
    }

    /// The entities the collection held when this proxy was built.
    pub fn original_models(&self) -> &[Arc<Entity>] {
        &self.original_models
    }

    /// Entity proxies for [`original_models`](Self::original_models), in
    /// the same order.
    pub fn models(&self) -> &[EntityProxy] {
        &self.models
    }

    pub fn at(&self, index: usize) -> Option<&EntityProxy> {
        self.models.get(index)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityProxy> {
        self.models.iter()
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    /// Property-style read of a mirrored collection property.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.members.read(name).ok().flatten()
    }

    /// Property-style write of a mirrored collection property.
    pub fn assign(&self, name: &str, value: Value) -> Result<()> {
        self.members.write(name, value)
    }

    /// Call a forwarded collection method.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.members.invoke(name, args)
    }
}

impl<'a> IntoIterator for &'a CollectionProxy {
    type Item = &'a EntityProxy;
    type IntoIter = std::slice::Iter<'a, EntityProxy>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

impl std::fmt::Debug for CollectionProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionProxy")
            .field("models", &self.models.len())
            .field("members", &self.members)
            .finish()
    }
}
