use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// Raised by an entity validator when an attribute write is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"Validation failed for "{}": {}"#, self.key, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// MirrorError: top-level rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MirrorError {
    #[error("\"{0}\" is not a member of this object")]
    UnknownMember(String),

    #[error("\"{0}\" is an accessor, not a method")]
    NotCallable(String),

    #[error("\"{0}\" is a method, not an accessor")]
    NotAnAccessor(String),

    #[error("Invalid arguments for \"{method}\": {message}")]
    InvalidArguments { method: String, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MirrorError {
    pub(crate) fn invalid_arguments(method: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience alias: the default error type is `MirrorError`.
pub type Result<T, E = MirrorError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
