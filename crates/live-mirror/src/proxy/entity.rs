//! EntityProxy: a live lens over one entity.
//!
//! Construction order:
//!   1. keep the entity and a handle to its raw attribute bag,
//!   2. forward every prototype method,
//!   3. alias every plain property present now,
//!   4. mirror every attribute present now (shadowing same-named members),
//!   5. wrap the forwarded `set` so that writing a key with no member
//!      installs an attribute mirror for it before the write runs.
//!
//! The proxy stores no attribute values; every read and write lands on the
//! entity.

use std::sync::{Arc, Weak};

use serde_json::Value;

use crate::{
    error::Result,
    mirror::{Member, MemberKind, Members, Proxifier},
    source::{Attributes, Entity},
};

use super::options::ProxyOptions;

pub struct EntityProxy {
    original: Arc<Entity>,
    attributes: Attributes,
    members: Arc<Members>,
}

impl EntityProxy {
    pub fn new(entity: Arc<Entity>) -> Self {
        Self::with_options(entity, &ProxyOptions::default())
    }

    pub fn with_options(entity: Arc<Entity>, options: &ProxyOptions) -> Self {
        let proxifier = Proxifier::new();
        let members = Arc::new(Members::new());
        let attributes = entity.attributes().clone();

        proxifier.install_methods(&members, &entity);
        proxifier.install_properties(&members, &entity);
        for key in entity.keys() {
            proxifier.install_attribute(&members, &entity, &key);
        }
        intercept_set(&members, &entity, options.discovers_batched_sets());

        tracing::debug!(
            cid = %entity.cid(),
            members = members.len(),
            "entity proxy constructed"
        );

        Self {
            original: entity,
            attributes,
            members,
        }
    }

    /// The mirrored entity.
    pub fn original(&self) -> &Arc<Entity> {
        &self.original
    }

    /// Raw attribute bag of the entity. Reads are live, but the accessors
    /// are authoritative.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn member_kind(&self, name: &str) -> Option<MemberKind> {
        self.members.kind(name)
    }

    /// Property-style read (`proxy.name`). Methods and unknown names read as
    /// `None`.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.members.read(name).ok().flatten()
    }

    /// Property-style write (`proxy.name = value`).
    ///
    /// An unknown name is discovered: an attribute mirror is installed and
    /// the value is written through it. Writing over a method fails with
    /// [`MirrorError::NotAnAccessor`](crate::error::MirrorError::NotAnAccessor).
    pub fn assign(&self, name: &str, value: Value) -> Result<()> {
        if !self.members.contains(name) {
            discover(&self.members, &self.original, name);
        }
        self.members.write(name, value)
    }

    /// Call a forwarded method.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.members.invoke(name, args)
    }

    /// `set(key, value)` through the forwarded (and intercepted) method.
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        self.call("set", &[Value::String(key.to_string()), value])
            .map(|_| ())
    }

    /// `get(key)` through the forwarded method.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.call("get", &[Value::String(key.to_string())])
    }
}

impl std::fmt::Debug for EntityProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityProxy")
            .field("original", &self.original.cid())
            .field("members", &self.members)
            .finish()
    }
}

/// Replace the forwarded `set` with one that mirrors unknown keys first.
///
/// A key that already names a member (accessor or method) is written
/// through without touching the registry, so `set("get", ..)` never hides
/// the forwarded `get`.
///
/// The wrapper holds the registry weakly: the registry owns the wrapper.
fn intercept_set(members: &Arc<Members>, entity: &Arc<Entity>, batched: bool) {
    let Some(Member::Method(forward)) = members.lookup("set") else {
        return;
    };
    let registry: Weak<Members> = Arc::downgrade(members);
    let entity = Arc::clone(entity);
    members.define_method(
        "set",
        Arc::new(move |args: &[Value]| -> Result<Value> {
            if let Some(members) = registry.upgrade() {
                match args.first() {
                    Some(Value::String(key)) if !members.contains(key) => {
                        discover(&members, &entity, key);
                    }
                    Some(Value::Object(batch)) if batched => {
                        for key in batch.keys() {
                            if !members.contains(key) {
                                discover(&members, &entity, key);
                            }
                        }
                    }
                    _ => {}
                }
            }
            forward(args)
        }),
    );
}

fn discover(members: &Members, entity: &Arc<Entity>, key: &str) {
    Proxifier::new().install_attribute(members, entity, key);
    tracing::debug!(cid = %entity.cid(), attribute = key, "discovered attribute on write");
}
