//! Primitive codec.
//!
//! Responsibilities:
//! - Fixed-width big-endian integers and floats, one-byte booleans
//! - Length-prefixed UTF-8 strings
//! - Fixed-length primitive arrays whose count is known by the caller
//! - The in-memory stream cursor (`WBuffer` / `RBuffer`)
//!
//! Non-responsibilities:
//! - Frames (see `framing`)
//! - Polymorphic dispatch (see `object`)
//! - Counted collections (see `containers`)

pub mod types;
pub mod encode;
pub mod decode;

pub use types::CodecError;
pub use encode::WBuffer;
pub use decode::RBuffer;
