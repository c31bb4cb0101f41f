//! Object graph codec.
//!
//! Responsibilities:
//! - The `Object` contract every record implements
//! - Common base metadata (`ObjectBase`)
//! - Polymorphic slots: class name + frame, or the null sentinel
//!
//! A record's `marshal` opens a frame, writes its base and fields in
//! declared order, and closes the frame. `unmarshal` mirrors it exactly.

pub mod types;
pub mod base;
pub mod encode;
pub mod decode;

pub use types::{Object, ObjectDyn};
pub use base::{ObjectBase, ObjectBits};
