//! AttributeChange: emitted by an `Entity` after an attribute write that
//! actually changed the stored value.

use serde_json::Value;

/// One attribute transition on an entity.
///
/// `previous` is `None` when the attribute did not exist before the write;
/// `current` is `None` when the write removed it (`unset`).
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChange {
    pub key: String,
    pub previous: Option<Value>,
    pub current: Option<Value>,
}

impl AttributeChange {
    /// Whether this change introduced a key the entity did not have before.
    pub fn is_addition(&self) -> bool {
        self.previous.is_none() && self.current.is_some()
    }

    /// Whether this change removed the key.
    pub fn is_removal(&self) -> bool {
        self.current.is_none()
    }
}
