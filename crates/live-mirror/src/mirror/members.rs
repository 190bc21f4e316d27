//! Members: the key → member registry every proxy dispatches through.
//!
//! # Locking
//!
//! Entries are cloned out of the registry before a getter, setter or
//! forwarder runs, and the lock is released first. A forwarder may therefore
//! install new members on the same registry (auto-discovery does exactly
//! that).

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{MirrorError, Result};

pub type Getter = Arc<dyn Fn() -> Option<Value> + Send + Sync>;
pub type Setter = Arc<dyn Fn(Value) -> Result<()> + Send + Sync>;
pub type Forwarder = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Which mirror installed an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorOrigin {
    Attribute,
    Property,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Accessor(AccessorOrigin),
    Method,
}

/// A get/set pair.
#[derive(Clone)]
pub struct Accessor {
    origin: AccessorOrigin,
    getter: Getter,
    setter: Setter,
}

impl Accessor {
    pub fn new(origin: AccessorOrigin, getter: Getter, setter: Setter) -> Self {
        Self {
            origin,
            getter,
            setter,
        }
    }

    pub fn origin(&self) -> AccessorOrigin {
        self.origin
    }

    pub fn get(&self) -> Option<Value> {
        (self.getter)()
    }

    pub fn set(&self, value: Value) -> Result<()> {
        (self.setter)(value)
    }
}

#[derive(Clone)]
pub enum Member {
    Accessor(Accessor),
    Method(Forwarder),
}

impl Member {
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Accessor(accessor) => MemberKind::Accessor(accessor.origin),
            Member::Method(_) => MemberKind::Method,
        }
    }
}

#[derive(Default)]
pub struct Members {
    entries: RwLock<IndexMap<String, Member>>,
}

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an accessor, replacing any member of the same name.
    pub fn define_accessor(&self, name: impl Into<String>, accessor: Accessor) -> Option<Member> {
        self.entries
            .write()
            .insert(name.into(), Member::Accessor(accessor))
    }

    /// Install a forwarding method, replacing any member of the same name.
    pub fn define_method(&self, name: impl Into<String>, forwarder: Forwarder) -> Option<Member> {
        self.entries
            .write()
            .insert(name.into(), Member::Method(forwarder))
    }

    pub fn remove(&self, name: &str) -> Option<Member> {
        self.entries.write().shift_remove(name)
    }

    pub fn lookup(&self, name: &str) -> Option<Member> {
        self.entries.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<MemberKind> {
        self.entries.read().get(name).map(Member::kind)
    }

    pub fn is_accessor(&self, name: &str) -> bool {
        matches!(self.kind(name), Some(MemberKind::Accessor(_)))
    }

    pub fn is_method(&self, name: &str) -> bool {
        matches!(self.kind(name), Some(MemberKind::Method))
    }

    /// All member names in installation order.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn accessor_names(&self) -> Vec<String> {
        self.names_where(|m| matches!(m, Member::Accessor(_)))
    }

    pub fn method_names(&self) -> Vec<String> {
        self.names_where(|m| matches!(m, Member::Method(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Run the getter for `name`. Unknown names read as `Ok(None)`.
    pub fn read(&self, name: &str) -> Result<Option<Value>> {
        match self.lookup(name) {
            Some(Member::Accessor(accessor)) => Ok(accessor.get()),
            Some(Member::Method(_)) => Err(MirrorError::NotAnAccessor(name.to_string())),
            None => Ok(None),
        }
    }

    /// Run the setter for `name`. Errors from the setter pass through as-is.
    pub fn write(&self, name: &str, value: Value) -> Result<()> {
        match self.lookup(name) {
            Some(Member::Accessor(accessor)) => accessor.set(value),
            Some(Member::Method(_)) => Err(MirrorError::NotAnAccessor(name.to_string())),
            None => Err(MirrorError::UnknownMember(name.to_string())),
        }
    }

    /// Call the forwarder for `name`.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.lookup(name) {
            Some(Member::Method(forwarder)) => forwarder(args),
            Some(Member::Accessor(_)) => Err(MirrorError::NotCallable(name.to_string())),
            None => Err(MirrorError::UnknownMember(name.to_string())),
        }
    }

    fn names_where(&self, keep: impl Fn(&Member) -> bool) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|(_, member)| keep(member))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl std::fmt::Debug for Members {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read();
        f.debug_map()
            .entries(entries.iter().map(|(name, member)| (name, member.kind())))
            .finish()
    }
}
