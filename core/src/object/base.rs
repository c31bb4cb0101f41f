//! object/base.rs
//! Common base metadata carried by every record.
//!
//! Layout (inside its own frame):
//!
//! ```text
//! [ version (2) ][ byte_count (4) ]
//! [ unique_id (4) ]
//! [ bits (4) ]
//! ```

use std::fmt;

use bitflags::bitflags;

use crate::constants::class_names;
use crate::object::types::Object;
use crate::wire::{CodecError, RBuffer, WBuffer};

bitflags! {
    /// Status bits stored with every object.
    /// Unknown bits are preserved so a decode/encode cycle is lossless.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectBits: u32 {
        const CAN_DELETE    = 1 << 0;
        const MUST_CLEANUP  = 1 << 3;
        const IS_REFERENCED = 1 << 4;
        const HAS_UUID      = 1 << 5;
        const IS_ON_HEAP    = 0x0100_0000;
        const NOT_DELETED   = 0x0200_0000;
        const ZOMBIE        = 0x0400_0000;
    }
}

impl Default for ObjectBits {
    fn default() -> Self {
        ObjectBits::IS_ON_HEAP | ObjectBits::NOT_DELETED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectBase {
    pub unique_id: u32,
    pub bits: ObjectBits,
}

impl ObjectBase {
    pub const VERSION: u16 = 1;

    pub fn new(unique_id: u32) -> Self {
        Self { unique_id, ..Default::default() }
    }
}

impl fmt::Display for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object{{UniqueID: {}, Bits: 0x{:08x}}}", self.unique_id, self.bits.bits())
    }
}

impl Object for ObjectBase {
    fn class(&self) -> &'static str {
        class_names::OBJECT
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_u32(self.unique_id);
        w.write_u32(self.bits.bits());
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        self.unique_id = r.read_u32()?;
        self.bits = ObjectBits::from_bits_retain(r.read_u32()?);
        r.check_frame(&hdr, self.class())
    }
}
