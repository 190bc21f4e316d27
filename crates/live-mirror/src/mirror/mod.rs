//! Mirrors: accessor pairs and forwarders installed on a destination.
//!
//! # Overview
//!
//! A destination is a [`Members`] registry: a runtime map from name to
//! either an accessor pair or a forwarding method. Mirrors install entries
//! into it; nothing is ever copied from the source.
//!
//! - [`AttributeMirror`]: accessor pair over `get`/`set` of an
//!   [`AttributeSource`](crate::source::AttributeSource).
//! - [`PropertyMirror`]: accessor pair aliasing a plain property.
//! - [`MethodMirror`]: one forwarder per method reachable through the
//!   source's prototype chain, invoked with the source as receiver.
//! - [`Proxifier`]: the four install primitives bundled as one service.
//!
//! Re-installing a name replaces the previous entry.

pub mod attribute;
pub mod members;
pub mod method;
pub mod property;
pub mod proxifier;

pub use attribute::AttributeMirror;
pub use members::{Accessor, AccessorOrigin, Forwarder, Getter, Member, MemberKind, Members, Setter};
pub use method::MethodMirror;
pub use property::PropertyMirror;
pub use proxifier::Proxifier;
