//! Object framing.
//!
//! Every encoded object starts with `[version:u16][byte_count:u32]`.
//! `byte_count` covers everything after itself up to the end of the object,
//! nested frames included, so a reader can verify or skip any object
//! without understanding its fields.
//!
//! Responsibilities:
//! - Reserve and back-patch byte counts while writing
//! - Read headers, enforce the version policy, check consumed length
//! - Skip whole objects
//!
//! Non-responsibilities:
//! - Field layout (each record owns its own order)
//! - Class names (see `object`)

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{FrameHandle, FrameHeader};
