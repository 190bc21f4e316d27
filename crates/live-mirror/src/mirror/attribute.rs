//! AttributeMirror: accessor pair over a source's named-attribute API.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::source::AttributeSource;

use super::members::{Accessor, AccessorOrigin, Getter, Members, Setter};

/// Installs accessors that forward to `get(name)` / `set(name, value)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeMirror;

impl AttributeMirror {
    /// Install (or replace) the accessor `name` on `destination`.
    ///
    /// Writes go through the source's `set`, never the raw bag, so the
    /// source's validation and change notification run on every write. Any
    /// member already named `name` (including a forwarded method) is
    /// shadowed.
    pub fn install<S>(destination: &Members, source: &Arc<S>, name: &str)
    where
        S: AttributeSource + 'static,
    {
        let getter: Getter = {
            let source = Arc::clone(source);
            let key = name.to_string();
            Arc::new(move || source.get(&key))
        };
        let setter: Setter = {
            let source = Arc::clone(source);
            let key = name.to_string();
            Arc::new(move |value: Value| -> Result<()> { source.set(&key, value) })
        };
        destination.define_accessor(name, Accessor::new(AccessorOrigin::Attribute, getter, setter));
        tracing::trace!(attribute = name, "installed attribute mirror");
    }
}
