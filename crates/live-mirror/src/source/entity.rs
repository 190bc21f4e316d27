//! Entity: the persistence-side record a proxy mirrors.
//!
//! An entity owns a named-attribute bag (`serde_json` values, insertion
//! ordered), a set of plain properties (`cid`, `idAttribute`, ...) and a
//! prototype chain of methods. Every attribute write goes through
//! [`Entity::set`] / [`Entity::set_many`], which run the optional validator
//! and notify change listeners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use serde_json::{json, Map, Value};

use crate::{
    error::{MirrorError, Result, ValidationError},
    events::{AttributeChange, EventEmitter, ListenerId},
};

use super::{
    properties::Properties,
    prototype::{str_arg, Prototype},
    traits::{AttributeSource, MethodSource, PropertySource},
};

static NEXT_CID: AtomicU64 = AtomicU64::new(1);
static BASE_PROTOTYPE: OnceLock<Arc<Prototype<Entity>>> = OnceLock::new();

/// Attribute validator, called before every write.
pub type Validator =
    dyn Fn(&str, &Value) -> std::result::Result<(), ValidationError> + Send + Sync;

// ============================================================================
// Attributes: shared handle to the raw bag
// ============================================================================

/// Shared handle to an entity's raw attribute bag.
///
/// Reads see the live bag. Writes are crate-private: outside code writes
/// through [`Entity::set`] so validation and change events are not skipped.
#[derive(Clone, Default)]
pub struct Attributes {
    bag: Arc<RwLock<Map<String, Value>>>,
}

impl Attributes {
    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            bag: Arc::new(RwLock::new(map)),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.bag.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.bag.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.bag.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bag.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bag.read().is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.bag.read().clone()
    }

    /// Whether two handles point at the same bag.
    pub fn same_bag(&self, other: &Attributes) -> bool {
        Arc::ptr_eq(&self.bag, &other.bag)
    }
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.bag.read().iter()).finish()
    }
}

// ============================================================================
// Entity
// ============================================================================

pub struct Entity {
    attributes: Attributes,
    properties: Properties,
    prototype: Arc<Prototype<Entity>>,
    validator: Option<Arc<Validator>>,
    changes: EventEmitter<AttributeChange>,
}

impl Entity {
    /// An entity with the base prototype.
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self::with_prototype(attributes, Self::base_prototype())
    }

    /// Build from a JSON value. Non-object values yield an empty entity.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Self::new(Map::new()),
        }
    }

    /// An entity whose methods resolve through `prototype`.
    ///
    /// Initial attributes are stored as given; the validator (if any) only
    /// applies to later writes.
    pub fn with_prototype(attributes: Map<String, Value>, prototype: Arc<Prototype<Entity>>) -> Self {
        let properties = Properties::new();
        let cid = NEXT_CID.fetch_add(1, Ordering::Relaxed);
        properties.set("cid", json!(format!("c{cid}")));
        properties.set("idAttribute", json!("id"));
        Self {
            attributes: Attributes::from_map(attributes),
            properties,
            prototype,
            validator: None,
            changes: EventEmitter::new(),
        }
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&str, &Value) -> std::result::Result<(), ValidationError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Shared prototype every plain entity resolves through.
    pub fn base_prototype() -> Arc<Prototype<Entity>> {
        Arc::clone(BASE_PROTOTYPE.get_or_init(|| Arc::new(base_prototype())))
    }

    // -----------------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------------

    /// Client-side id, unique per process.
    pub fn cid(&self) -> String {
        self.properties.get_str("cid").unwrap_or_default()
    }

    pub fn id_attribute(&self) -> String {
        self.properties
            .get_str("idAttribute")
            .unwrap_or_else(|| "id".to_string())
    }

    /// Server id: the value of the `idAttribute` attribute, if non-null.
    pub fn id(&self) -> Option<Value> {
        self.get(&self.id_attribute()).filter(|v| !v.is_null())
    }

    /// Whether the entity has never been assigned a server id.
    pub fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Whether `key` is this entity's server id or client id.
    pub fn matches(&self, key: &Value) -> bool {
        if self.id().as_ref() == Some(key) {
            return true;
        }
        matches!(key, Value::String(s) if *s == self.cid())
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    pub fn get(&self, key: &str) -> Option<Value> {
        self.attributes.get(key)
    }

    /// Present and not null.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn keys(&self) -> Vec<String> {
        self.attributes.keys()
    }

    /// Validate and store one attribute, then notify listeners if the stored
    /// value changed.
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        self.validate(key, &value)?;
        let previous = self.attributes.bag.write().insert(key.to_string(), value.clone());
        if previous.as_ref() != Some(&value) {
            self.changes.emit(&AttributeChange {
                key: key.to_string(),
                previous,
                current: Some(value),
            });
        }
        Ok(())
    }

    /// Batched write. Every pair is validated before any is stored, so a
    /// refused value leaves the bag untouched.
    pub fn set_many(&self, attributes: &Map<String, Value>) -> Result<()> {
        for (key, value) in attributes {
            self.validate(key, value)?;
        }
        let changes: Vec<AttributeChange> = {
            let mut bag = self.attributes.bag.write();
            attributes
                .iter()
                .filter_map(|(key, value)| {
                    let previous = bag.insert(key.clone(), value.clone());
                    (previous.as_ref() != Some(value)).then(|| AttributeChange {
                        key: key.clone(),
                        previous,
                        current: Some(value.clone()),
                    })
                })
                .collect()
        };
        for change in &changes {
            self.changes.emit(change);
        }
        Ok(())
    }

    /// Remove an attribute. Returns `false` if it was absent.
    pub fn unset(&self, key: &str) -> bool {
        let previous = self.attributes.bag.write().shift_remove(key);
        match previous {
            Some(previous) => {
                self.changes.emit(&AttributeChange {
                    key: key.to_string(),
                    previous: Some(previous),
                    current: None,
                });
                true
            }
            None => false,
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.attributes.snapshot())
    }

    /// Handle to the raw attribute bag.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    // -----------------------------------------------------------------------
    // Change listeners
    // -----------------------------------------------------------------------

    pub fn on_change(&self, listener: impl Fn(&AttributeChange) + Send + Sync + 'static) -> ListenerId {
        self.changes.on(listener)
    }

    pub fn off_change(&self, id: ListenerId) -> bool {
        self.changes.off(id)
    }

    // -----------------------------------------------------------------------
    // Methods
    // -----------------------------------------------------------------------

    /// Call a prototype method with `self` as receiver.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.prototype
            .invoke(self, name, args)
            .unwrap_or_else(|| Err(MirrorError::UnknownMember(name.to_string())))
    }

    fn validate(&self, key: &str, value: &Value) -> Result<()> {
        if let Some(validator) = &self.validator {
            validator(key, value)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("cid", &self.cid())
            .field("prototype", &self.prototype.name())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl AttributeSource for Entity {
    fn get(&self, key: &str) -> Option<Value> {
        Entity::get(self, key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        Entity::set(self, key, value)
    }

    fn attribute_keys(&self) -> Vec<String> {
        self.keys()
    }
}

impl PropertySource for Entity {
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

impl MethodSource for Entity {
    fn prototype(&self) -> &Arc<Prototype<Self>> {
        &self.prototype
    }
}

// ============================================================================
// Base prototype
// ============================================================================

fn base_prototype() -> Prototype<Entity> {
    Prototype::new("Entity")
        .method("get", |entity: &Entity, args| {
            let key = str_arg("get", args, 0)?;
            Ok(entity.get(key).unwrap_or(Value::Null))
        })
        .method("set", |entity: &Entity, args| {
            match args.first() {
                Some(Value::String(key)) => {
                    entity.set(key, args.get(1).cloned().unwrap_or(Value::Null))?
                }
                Some(Value::Object(attributes)) => entity.set_many(attributes)?,
                _ => {
                    return Err(MirrorError::invalid_arguments(
                        "set",
                        "expected a key and value, or an object of attributes",
                    ))
                }
            }
            Ok(Value::Null)
        })
        .method("unset", |entity: &Entity, args| {
            let key = str_arg("unset", args, 0)?;
            Ok(Value::Bool(entity.unset(key)))
        })
        .method("has", |entity: &Entity, args| {
            let key = str_arg("has", args, 0)?;
            Ok(Value::Bool(entity.has(key)))
        })
        .method("keys", |entity: &Entity, _| Ok(json!(entity.keys())))
        .method("toJSON", |entity: &Entity, _| Ok(entity.to_json()))
        .method("isNew", |entity: &Entity, _| Ok(Value::Bool(entity.is_new())))
}
