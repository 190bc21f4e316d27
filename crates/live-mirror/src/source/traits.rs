//! Capabilities a source object exposes to the mirrors.
//!
//! Each mirror kind needs exactly one of these: attribute mirrors go through
//! [`AttributeSource`], property mirrors through [`PropertySource`], method
//! mirrors through [`MethodSource`]. `Entity` implements all three,
//! `Collection` the last two.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

use super::prototype::Prototype;

/// Named-attribute accessor API.
///
/// `set` is the only write path mirrors use, so whatever the source does on
/// a write (validation, change notification) still happens.
pub trait AttributeSource: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    /// Keys currently present in the attribute bag, in insertion order.
    fn attribute_keys(&self) -> Vec<String>;
}

/// Plain properties, read and written directly.
pub trait PropertySource: Send + Sync {
    fn property_names(&self) -> Vec<String>;
    fn property(&self, name: &str) -> Option<Value>;
    fn set_property(&self, name: &str, value: Value);
}

/// Access to the method-resolution chain of a source.
pub trait MethodSource: Send + Sync + Sized {
    fn prototype(&self) -> &Arc<Prototype<Self>>;
}
