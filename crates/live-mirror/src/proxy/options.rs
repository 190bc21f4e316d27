//! Proxy construction options.

/// Options applied when a proxy is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyOptions {
    /// Whether `set({..})` through a proxy mirrors every unknown key of the
    /// object (default: `true`). When `false`, only `set(key, value)` calls
    /// discover new attributes.
    pub discover_batched_sets: Option<bool>,
}

impl ProxyOptions {
    pub fn discovers_batched_sets(&self) -> bool {
        self.discover_batched_sets.unwrap_or(true)
    }
}
