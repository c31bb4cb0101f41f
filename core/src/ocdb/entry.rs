//! ocdb/entry.rs
//!
//! `Entry`: the top-level OCDB record. It holds the payload object, its
//! identity and its provenance.
//!
//! Design notes:
//! - The payload is a polymorphic slot of any registered class.
//! - Metadata is a slot too, but statically typed: anything other than
//!   `MetaData` in that slot fails with `UnexpectedClass`.

use std::fmt;
use std::io;

use crate::constants::class_names;
use crate::object::{Object, ObjectBase};
use crate::ocdb::{Id, MetaData};
use crate::wire::{CodecError, RBuffer, WBuffer};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub base: ObjectBase,
    pub object: Option<Box<dyn Object>>,
    pub id: Id,
    pub meta: Option<Box<MetaData>>,
    pub owner: bool,
}

impl Entry {
    pub const VERSION: u16 = 1;

    pub fn new(id: Id, object: impl Object) -> Self {
        let object: Box<dyn Object> = Box::new(object);
        Self { id, object: Some(object), owner: true, ..Self::default() }
    }

    pub fn with_meta(mut self, meta: MetaData) -> Self {
        self.meta = Some(Box::new(meta));
        self
    }

    pub fn object(&self) -> Option<&dyn Object> {
        self.object.as_deref()
    }

    /// Payload downcast to its concrete record type.
    pub fn object_as<T: Object>(&self) -> Option<&T> {
        self.object().and_then(|o| o.downcast_ref::<T>())
    }

    /// Human readable report: identity, owner flag, metadata, payload.
    pub fn display(&self, w: &mut impl io::Write) -> io::Result<()> {
        writeln!(w, "=== Entry ===")?;
        writeln!(w, "ID: {}", self.id)?;
        writeln!(w, "Owner: {}", self.owner)?;
        if let Some(meta) = &self.meta {
            writeln!(w, "MetaData:")?;
            meta.display(w)?;
        }
        if let Some(obj) = &self.object {
            writeln!(w, "Object: {}", obj.class())?;
            writeln!(w, "{}", describe(obj.as_ref()))?;
            writeln!(w, "===")?;
        }
        Ok(())
    }
}

/// Display form for the payload records this crate knows, debug otherwise.
pub(crate) fn describe(obj: &dyn Object) -> String {
    use crate::containers::{ObjArray, ObjString, ObjectMap};
    use crate::ocdb::{MpExMap, Muon2DMap, MuonCalibParamNd};

    if let Some(o) = obj.downcast_ref::<Muon2DMap>() {
        o.to_string()
    } else if let Some(o) = obj.downcast_ref::<MpExMap>() {
        o.to_string()
    } else if let Some(o) = obj.downcast_ref::<MuonCalibParamNd>() {
        o.to_string()
    } else if let Some(o) = obj.downcast_ref::<ObjArray>() {
        o.to_string()
    } else if let Some(o) = obj.downcast_ref::<ObjectMap>() {
        o.to_string()
    } else if let Some(o) = obj.downcast_ref::<ObjString>() {
        o.to_string()
    } else if let Some(o) = obj.downcast_ref::<Entry>() {
        o.to_string()
    } else {
        format!("{:?}", obj)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = self.object.as_ref().map(|o| o.class()).unwrap_or("<nil>");
        write!(f, "Entry{{ID: {}, Owner: {}, Object: {}}}", self.id, self.owner, class)
    }
}

impl Object for Entry {
    fn class(&self) -> &'static str {
        class_names::CDB_ENTRY
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_object_any(self.object.as_deref())?;
        w.write_object(&self.id)?;
        w.write_object_any(self.meta.as_deref().map(|m| m as &dyn Object))?;
        w.write_bool(self.owner);
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.object = r.read_object_any()?;
        r.read_object(&mut self.id)?;
        self.meta = r.read_object_as::<MetaData>()?;
        self.owner = r.read_bool()?;
        r.check_frame(&hdr, self.class())
    }
}
