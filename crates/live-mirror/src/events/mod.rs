//! Listener plumbing shared by entities (attribute change notifications) and
//! promises (progress notifications).
//!
//! - [`emitter`]: [`EventEmitter<T>`], a typed synchronous pub/sub list.
//! - [`change`]: [`AttributeChange`], the payload entities emit on `set`.

pub mod change;
pub mod emitter;

pub use change::AttributeChange;
pub use emitter::{EventEmitter, ListenerFn, ListenerId};
