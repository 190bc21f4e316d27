//! The persistence-side objects that proxies mirror.
//!
//! - [`traits`]: the three capabilities mirrors read through:
//!   [`AttributeSource`], [`PropertySource`], [`MethodSource`].
//! - [`prototype`]: [`Prototype<S>`], a method table with an optional parent.
//! - [`properties`]: [`Properties`], a plain (non-attribute) property bag.
//! - [`entity`]: [`Entity`], a named-attribute bag with `get`/`set`.
//! - [`collection`]: [`Collection`], an ordered sequence of entities.

pub mod collection;
pub mod entity;
pub mod properties;
pub mod prototype;
pub mod traits;

pub use collection::Collection;
pub use entity::{Attributes, Entity, Validator};
pub use properties::Properties;
pub use prototype::{MethodFn, Prototype};
pub use traits::{AttributeSource, MethodSource, PropertySource};
