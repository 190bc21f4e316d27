//! PropertyMirror: accessor pairs aliasing plain properties.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::source::PropertySource;

use super::members::{Accessor, AccessorOrigin, Getter, Members, Setter};

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyMirror;

impl PropertyMirror {
    /// Alias `source`'s property `name` on `destination`, replacing any
    /// member of that name.
    pub fn install<S>(destination: &Members, source: &Arc<S>, name: &str)
    where
        S: PropertySource + 'static,
    {
        let getter: Getter = {
            let source = Arc::clone(source);
            let name = name.to_string();
            Arc::new(move || source.property(&name))
        };
        let setter: Setter = {
            let source = Arc::clone(source);
            let name = name.to_string();
            Arc::new(move |value: Value| -> Result<()> {
                source.set_property(&name, value);
                Ok(())
            })
        };
        destination.define_accessor(name, Accessor::new(AccessorOrigin::Property, getter, setter));
        tracing::trace!(property = name, "installed property mirror");
    }

    /// Alias every property `source` has right now. Properties the source
    /// gains later are not picked up; call [`PropertyMirror::install`] for
    /// them. Returns the number of accessors installed.
    pub fn install_all<S>(destination: &Members, source: &Arc<S>) -> usize
    where
        S: PropertySource + 'static,
    {
        let names = source.property_names();
        for name in &names {
            Self::install(destination, source, name);
        }
        names.len()
    }
}
