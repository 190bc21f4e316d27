//! MethodMirror: forwards prototype methods with the source as receiver.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::source::MethodSource;

use super::members::{Forwarder, Members};

#[derive(Debug, Clone, Copy, Default)]
pub struct MethodMirror;

impl MethodMirror {
    /// Install one forwarder per method reachable through `source`'s
    /// prototype chain (inherited ones included, nearest definition wins).
    ///
    /// Each forwarder calls the method with `source` as receiver, never the
    /// destination, so methods that rely on the source's internals keep
    /// working. Returns the number of forwarders installed.
    pub fn install<S>(destination: &Members, source: &Arc<S>) -> usize
    where
        S: MethodSource + 'static,
    {
        let methods = source.prototype().resolved();
        for (name, method) in &methods {
            let receiver = Arc::clone(source);
            let method = Arc::clone(method);
            let forwarder: Forwarder =
                Arc::new(move |args: &[Value]| -> Result<Value> { method(&*receiver, args) });
            destination.define_method(name.as_str(), forwarder);
        }
        tracing::trace!(
            prototype = source.prototype().name(),
            methods = methods.len(),
            "installed method mirrors"
        );
        methods.len()
    }
}
