//! Properties: plain values living next to (not inside) an attribute bag.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct Properties {
    values: RwLock<IndexMap<String, Value>>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.read().get(name).cloned()
    }

    /// Insert or overwrite. Returns the previous value.
    pub fn set(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.write().insert(name.into(), value)
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.values.write().shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Read a string-valued property.
    pub fn get_str(&self, name: &str) -> Option<String> {
        match self.values.read().get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}
