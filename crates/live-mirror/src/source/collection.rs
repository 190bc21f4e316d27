//! Collection: an ordered sequence of shared entities.
//!
//! The collection owns the sequence, not the entities: the same
//! `Arc<Entity>` may sit in several collections. The plain property `length`
//! is kept equal to the number of members.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use serde_json::{json, Map, Value};

use crate::error::{MirrorError, Result};

use super::{
    entity::Entity,
    properties::Properties,
    prototype::{str_arg, Prototype},
    traits::{MethodSource, PropertySource},
};

static BASE_PROTOTYPE: OnceLock<Arc<Prototype<Collection>>> = OnceLock::new();

pub struct Collection {
    models: RwLock<Vec<Arc<Entity>>>,
    properties: Properties,
    prototype: Arc<Prototype<Collection>>,
    model_prototype: Arc<Prototype<Entity>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::with_prototype(Self::base_prototype())
    }

    pub fn with_prototype(prototype: Arc<Prototype<Collection>>) -> Self {
        let collection = Self {
            models: RwLock::new(Vec::new()),
            properties: Properties::new(),
            prototype,
            model_prototype: Entity::base_prototype(),
        };
        collection.sync_length();
        collection
    }

    /// Prototype given to entities created by [`Collection::add`].
    pub fn with_model_prototype(mut self, prototype: Arc<Prototype<Entity>>) -> Self {
        self.model_prototype = prototype;
        self
    }

    pub fn from_entities(entities: impl IntoIterator<Item = Arc<Entity>>) -> Self {
        let collection = Self::new();
        collection.models.write().extend(entities);
        collection.sync_length();
        collection
    }

    pub fn base_prototype() -> Arc<Prototype<Collection>> {
        Arc::clone(BASE_PROTOTYPE.get_or_init(|| Arc::new(base_prototype())))
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Append an existing entity.
    pub fn push(&self, entity: Arc<Entity>) {
        self.models.write().push(entity);
        self.sync_length();
    }

    /// Create an entity from `attributes` and append it.
    pub fn add(&self, attributes: Map<String, Value>) -> Arc<Entity> {
        let entity = Arc::new(Entity::with_prototype(
            attributes,
            Arc::clone(&self.model_prototype),
        ));
        self.push(Arc::clone(&entity));
        entity
    }

    /// Remove the first member whose id or cid equals `key`.
    pub fn remove(&self, key: &Value) -> Option<Arc<Entity>> {
        let removed = {
            let mut models = self.models.write();
            let index = models.iter().position(|e| e.matches(key))?;
            models.remove(index)
        };
        self.sync_length();
        Some(removed)
    }

    /// Member whose id or cid equals `key`.
    pub fn get(&self, key: &Value) -> Option<Arc<Entity>> {
        self.models.read().iter().find(|e| e.matches(key)).cloned()
    }

    pub fn at(&self, index: usize) -> Option<Arc<Entity>> {
        self.models.read().get(index).cloned()
    }

    /// Snapshot of the current members, in order.
    pub fn models(&self) -> Vec<Arc<Entity>> {
        self.models.read().clone()
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// The value of `key` on every member (`null` where absent).
    pub fn pluck(&self, key: &str) -> Vec<Value> {
        self.models
            .read()
            .iter()
            .map(|e| e.get(key).unwrap_or(Value::Null))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.models.read().iter().map(|e| e.to_json()).collect())
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Call a prototype method with `self` as receiver.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.prototype
            .invoke(self, name, args)
            .unwrap_or_else(|| Err(MirrorError::UnknownMember(name.to_string())))
    }

    fn sync_length(&self) {
        let len = self.len();
        self.properties.set("length", json!(len));
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("prototype", &self.prototype.name())
            .field("len", &self.len())
            .finish()
    }
}

impl PropertySource for Collection {
    fn property_names(&self) -> Vec<String> {
        self.properties.names()
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name)
    }

    fn set_property(&self, name: &str, value: Value) {
        self.properties.set(name, value);
    }
}

impl MethodSource for Collection {
    fn prototype(&self) -> &Arc<Prototype<Self>> {
        &self.prototype
    }
}

// ============================================================================
// Base prototype
// ============================================================================

fn base_prototype() -> Prototype<Collection> {
    Prototype::new("Collection")
        .method("add", |collection: &Collection, args| match args.first() {
            Some(Value::Object(attributes)) => Ok(collection.add(attributes.clone()).to_json()),
            _ => Err(MirrorError::invalid_arguments(
                "add",
                "expected an object of attributes",
            )),
        })
        .method("remove", |collection: &Collection, args| {
            let key = args
                .first()
                .ok_or_else(|| MirrorError::invalid_arguments("remove", "missing argument 0"))?;
            Ok(Value::Bool(collection.remove(key).is_some()))
        })
        .method("get", |collection: &Collection, args| {
            let key = args
                .first()
                .ok_or_else(|| MirrorError::invalid_arguments("get", "missing argument 0"))?;
            Ok(collection
                .get(key)
                .map(|e| e.to_json())
                .unwrap_or(Value::Null))
        })
        .method("at", |collection: &Collection, args| {
            let index = args.first().and_then(Value::as_u64).ok_or_else(|| {
                MirrorError::invalid_arguments("at", "expected a non-negative index")
            })?;
            Ok(collection
                .at(index as usize)
                .map(|e| e.to_json())
                .unwrap_or(Value::Null))
        })
        .method("size", |collection: &Collection, _| Ok(json!(collection.len())))
        .method("pluck", |collection: &Collection, args| {
            let key = str_arg("pluck", args, 0)?;
            Ok(Value::Array(collection.pluck(key)))
        })
        .method("toJSON", |collection: &Collection, _| Ok(collection.to_json()))
}
