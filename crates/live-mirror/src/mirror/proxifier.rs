//! Proxifier: the install primitives behind every proxy, as one service.

use std::sync::Arc;

use crate::source::{AttributeSource, MethodSource, PropertySource};

use super::{AttributeMirror, Members, MethodMirror, PropertyMirror};

#[derive(Debug, Clone, Copy, Default)]
pub struct Proxifier;

impl Proxifier {
    pub fn new() -> Self {
        Self
    }

    /// See [`MethodMirror::install`].
    pub fn install_methods<S>(&self, destination: &Members, source: &Arc<S>) -> usize
    where
        S: MethodSource + 'static,
    {
        MethodMirror::install(destination, source)
    }

    /// See [`PropertyMirror::install_all`].
    pub fn install_properties<S>(&self, destination: &Members, source: &Arc<S>) -> usize
    where
        S: PropertySource + 'static,
    {
        PropertyMirror::install_all(destination, source)
    }

    /// See [`PropertyMirror::install`].
    pub fn install_property<S>(&self, destination: &Members, source: &Arc<S>, name: &str)
    where
        S: PropertySource + 'static,
    {
        PropertyMirror::install(destination, source, name)
    }

    /// See [`AttributeMirror::install`].
    pub fn install_attribute<S>(&self, destination: &Members, source: &Arc<S>, name: &str)
    where
        S: AttributeSource + 'static,
    {
        AttributeMirror::install(destination, source, name)
    }
}
