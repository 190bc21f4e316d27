//! Sync-specific types: the transport trait, requests, and configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::promise::{OperationHandle, Promise};
use crate::proxy::ProxyOptions;

// ============================================================================
// SyncTransport: user-provided I/O layer
// ============================================================================

/// User-implemented transport.
///
/// Returns immediately with an [`OperationHandle`]; the transport settles it
/// later through the matching `Deferred`.
pub trait SyncTransport: Send + Sync {
    fn sync(&self, request: SyncRequest) -> OperationHandle<Value, SyncTransportError>;
}

/// The promise every sync operation resolves to.
pub type SyncPromise = Promise<Value, SyncTransportError>;

/// Transport-level failure, delivered unchanged as the promise rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTransportError {
    pub message: String,
    pub kind: SyncErrorKind,
}

impl SyncTransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: SyncErrorKind::Transient,
        }
    }

    pub fn with_kind(message: impl Into<String>, kind: SyncErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl std::fmt::Display for SyncTransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SyncTransportError {}

/// Classification a transport may attach to a failure. Informational only:
/// nothing here retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorKind {
    Transient,
    Permanent,
    Auth,
    NotFound,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMethod {
    Create,
    Read,
    Update,
    Patch,
    Delete,
}

impl SyncMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Whether requests of this kind carry the entity's attributes.
    pub fn carries_payload(&self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Patch)
    }
}

impl std::fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub method: SyncMethod,
    /// Resource location, when one could be derived.
    pub url: Option<String>,
    /// Attributes for create/update/patch, `None` otherwise.
    pub payload: Option<Value>,
}

// ============================================================================
// Options
// ============================================================================

/// Configuration shared by every synced wrapper built from one
/// [`Services`](crate::Services).
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Fallback URL root when neither the entity nor the collection carries
    /// a `url` / `urlRoot` property.
    pub url_root: Option<String>,
    /// Options for proxies built by `proxy()`.
    pub proxy: ProxyOptions,
}

/// Join a root and an id with exactly one `/`.
pub(crate) fn join_url(root: &str, id: &Value) -> String {
    let id = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("{}/{}", root.trim_end_matches('/'), id)
}
