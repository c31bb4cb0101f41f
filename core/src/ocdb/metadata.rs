//! ocdb/metadata.rs
//! Provenance attached to an entry: producer class, responsible person,
//! beam period, software version, free comment and string-keyed properties.

use std::fmt;
use std::io;

use crate::constants::class_names;
use crate::containers::ObjectMap;
use crate::object::{Object, ObjectBase};
use crate::wire::{CodecError, RBuffer, WBuffer};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetaData {
    pub base: ObjectBase,
    pub object_class: String,
    pub responsible: String,
    pub beam_period: u32,
    pub aliroot_version: String,
    pub comment: String,
    pub properties: ObjectMap,
}

impl MetaData {
    pub const VERSION: u16 = 1;

    pub fn new(object_class: impl Into<String>, responsible: impl Into<String>) -> Self {
        Self {
            object_class: object_class.into(),
            responsible: responsible.into(),
            ..Self::default()
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_property(&mut self, key: &str, value: impl Object) {
        let value: Box<dyn Object> = Box::new(value);
        self.properties.insert(key, Some(value));
    }

    pub fn property(&self, key: &str) -> Option<&dyn Object> {
        self.properties.get(key)
    }

    /// Multi-line report used by `Entry::display`.
    pub fn display(&self, w: &mut impl io::Write) -> io::Result<()> {
        write!(w, "{}", self)
    }
}

impl fmt::Display for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class: {:?}", self.object_class)?;
        writeln!(f, "Responsible: {:?}", self.responsible)?;
        writeln!(f, "BeamPeriod: {}", self.beam_period)?;
        writeln!(f, "AliRoot Version: {:?}", self.aliroot_version)?;
        writeln!(f, "Comment: {:?}", self.comment)?;
        writeln!(f, "Properties: {}", self.properties.len())?;
        for (k, v) in self.properties.entries() {
            writeln!(f, "  key: {}", slot_text(k.as_deref()))?;
            writeln!(f, "  val: {}", slot_text(v.as_deref()))?;
        }
        Ok(())
    }
}

fn slot_text(obj: Option<&dyn Object>) -> String {
    match obj {
        None => "<nil>".to_owned(),
        Some(o) => match o.downcast_ref::<crate::containers::ObjString>() {
            Some(s) => s.as_str().to_owned(),
            None => format!("{:?}", o),
        },
    }
}

impl Object for MetaData {
    fn class(&self) -> &'static str {
        class_names::CDB_META_DATA
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_string(&self.object_class)?;
        w.write_string(&self.responsible)?;
        w.write_u32(self.beam_period);
        w.write_string(&self.aliroot_version)?;
        w.write_string(&self.comment)?;
        w.write_object(&self.properties)?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.object_class = r.read_string()?;
        self.responsible = r.read_string()?;
        self.beam_period = r.read_u32()?;
        self.aliroot_version = r.read_string()?;
        self.comment = r.read_string()?;
        r.read_object(&mut self.properties)?;
        r.check_frame(&hdr, self.class())
    }
}
