//! Prototype<S>: named methods over a receiver type `S`, chained to an
//! optional parent prototype.
//!
//! Lookup walks the chain from the most derived prototype outward; the
//! nearest definition of a name wins.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{MirrorError, Result};

/// A method body. The first argument is always the receiver.
pub type MethodFn<S> = dyn Fn(&S, &[Value]) -> Result<Value> + Send + Sync;

pub struct Prototype<S> {
    name: String,
    methods: IndexMap<String, Arc<MethodFn<S>>>,
    parent: Option<Arc<Prototype<S>>>,
}

impl<S> Prototype<S> {
    /// A root prototype with no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
            parent: None,
        }
    }

    /// A prototype inheriting every method of `parent`.
    pub fn extend(parent: &Arc<Prototype<S>>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Define (or override) a method on this prototype.
    pub fn method(
        mut self,
        name: impl Into<String>,
        body: impl Fn(&S, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Arc::new(body));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Prototype<S>>> {
        self.parent.as_ref()
    }

    /// Names defined directly on this prototype (not inherited).
    pub fn own_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Resolve `name` through the chain.
    pub fn lookup(&self, name: &str) -> Option<Arc<MethodFn<S>>> {
        let mut current = Some(self);
        while let Some(proto) = current {
            if let Some(method) = proto.methods.get(name) {
                return Some(Arc::clone(method));
            }
            current = proto.parent.as_deref();
        }
        None
    }

    /// Every method reachable through the chain, one entry per name, each
    /// bound to its nearest definition. Own methods come first.
    pub fn resolved(&self) -> Vec<(String, Arc<MethodFn<S>>)> {
        let mut out: IndexMap<String, Arc<MethodFn<S>>> = IndexMap::new();
        let mut current = Some(self);
        while let Some(proto) = current {
            for (name, method) in &proto.methods {
                out.entry(name.clone()).or_insert_with(|| Arc::clone(method));
            }
            current = proto.parent.as_deref();
        }
        out.into_iter().collect()
    }

    /// Invoke `name` with `receiver`, resolving through the chain.
    pub fn invoke(&self, receiver: &S, name: &str, args: &[Value]) -> Option<Result<Value>> {
        self.lookup(name).map(|method| method(receiver, args))
    }
}

/// Read argument `index` as a string, or fail with `InvalidArguments`.
pub(crate) fn str_arg<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a str> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(MirrorError::invalid_arguments(
            method,
            format!("argument {index} must be a string, got {other}"),
        )),
        None => Err(MirrorError::invalid_arguments(
            method,
            format!("missing argument {index}"),
        )),
    }
}

impl<S> std::fmt::Debug for Prototype<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prototype")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}
