use std::fmt;

use crate::constants::class_names;
use crate::object::{Object, ObjectBase};
use crate::wire::{CodecError, RBuffer, WBuffer};

/// Ordered array of polymorphic slots.
///
/// Layout (inside its frame): base, name, lower bound, `[count:i32]`,
/// then `count` polymorphic slots. Null slots are kept in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjArray {
    pub base: ObjectBase,
    pub name: String,
    pub lower_bound: i32,
    pub objs: Vec<Option<Box<dyn Object>>>,
}

impl ObjArray {
    pub const VERSION: u16 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obj: impl Object) {
        let obj: Box<dyn Object> = Box::new(obj);
        self.objs.push(Some(obj));
    }

    pub fn push_null(&mut self) {
        self.objs.push(None);
    }

    pub fn len(&self) -> usize {
        self.objs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }

    pub fn at(&self, i: usize) -> Option<&dyn Object> {
        self.objs.get(i).and_then(|o| o.as_deref())
    }

    /// Non-null elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Object> {
        self.objs.iter().filter_map(|o| o.as_deref())
    }
}

impl fmt::Display for ObjArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, obj) in self.objs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match obj {
                Some(obj) => write!(f, "{:?}", obj)?,
                None => write!(f, "<nil>")?,
            }
        }
        write!(f, "]")
    }
}

impl Object for ObjArray {
    fn class(&self) -> &'static str {
        class_names::OBJ_ARRAY
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_string(&self.name)?;
        w.write_i32(self.lower_bound);
        w.write_collection(&self.objs, |w, obj| {
            w.write_object_any(obj.as_deref()).map(|_| ())
        })?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.name = r.read_string()?;
        self.lower_bound = r.read_i32()?;
        self.objs = r.read_collection(|r| r.read_object_any())?;
        r.check_frame(&hdr, self.class())
    }
}
