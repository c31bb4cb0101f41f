use std::fmt;

use crate::constants::class_names;
use crate::object::{Object, ObjectBase};
use crate::wire::{CodecError, RBuffer, WBuffer};

/// String wrapped as a record, so it can sit in a polymorphic slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjString {
    pub base: ObjectBase,
    pub value: String,
}

impl ObjString {
    pub const VERSION: u16 = 1;

    pub fn new(value: impl Into<String>) -> Self {
        Self { base: ObjectBase::default(), value: value.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ObjString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl Object for ObjString {
    fn class(&self) -> &'static str {
        class_names::OBJ_STRING
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_string(&self.value)?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.value = r.read_string()?;
        r.check_frame(&hdr, self.class())
    }
}
