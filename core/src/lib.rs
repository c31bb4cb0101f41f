//! ocdb-core
//!
//! Versioned, self-describing binary object codec.
//! Every record is wrapped in a `[version][byte count]` frame, polymorphic
//! fields carry their class name and are instantiated through an explicit
//! class registry, and collections are written as a count followed by
//! their elements.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Codec kernel, leaves first
pub mod wire;
pub mod framing;
pub mod registry;
pub mod object;
pub mod containers;
pub mod codec;

// Record graph and drivers
pub mod ocdb;
pub mod parallel;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{decode_record, encode_any, encode_record, Decoder};
    pub use crate::config::CodecConfig;
    pub use crate::object::{Object, ObjectBase};
    pub use crate::registry::{Registry, RegistryBuilder};
    pub use crate::wire::{CodecError, RBuffer, WBuffer};
}
