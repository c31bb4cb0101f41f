//! containers/map.rs
//!
//! Associative container of polymorphic key/value pairs.
//!
//! Entries are kept in insertion order, so a decoded map re-encodes to the
//! same bytes. Readers must still treat the mapping as unordered: lookups go
//! through keys, never positions.

use std::fmt;

use crate::constants::class_names;
use crate::containers::ObjString;
use crate::object::{Object, ObjectBase};
use crate::wire::{CodecError, RBuffer, WBuffer};

pub type MapEntry = (Option<Box<dyn Object>>, Option<Box<dyn Object>>);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectMap {
    pub base: ObjectBase,
    pub name: String,
    entries: Vec<MapEntry>,
}

impl ObjectMap {
    pub const VERSION: u16 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Insert or replace the value stored under a string key.
    pub fn insert(&mut self, key: &str, value: Option<Box<dyn Object>>) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => {
                let key: Box<dyn Object> = Box::new(ObjString::new(key));
                self.entries.push((Some(key), value));
            }
        }
    }

    /// Append a raw pair without key de-duplication.
    pub fn push(&mut self, key: Option<Box<dyn Object>>, value: Option<Box<dyn Object>>) {
        self.entries.push((key, value));
    }

    /// Value stored under a string key.
    pub fn get(&self, key: &str) -> Option<&dyn Object> {
        self.position(key).and_then(|i| self.entries[i].1.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Object>> {
        self.position(key).and_then(|i| self.entries.remove(i).1)
    }

    /// String keys in insertion order; non-string keys are skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(k, _)| key_str(k.as_deref()))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| key_str(k.as_deref()) == Some(key))
    }
}

fn key_str(key: Option<&dyn Object>) -> Option<&str> {
    key.and_then(|k| k.downcast_ref::<ObjString>()).map(ObjString::as_str)
}

impl fmt::Display for ObjectMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Map{{Name: {:?}, Len: {}}}", self.name, self.entries.len())?;
        for (k, v) in &self.entries {
            writeln!(f, "  key: {}", display_slot(k.as_deref()))?;
            writeln!(f, "  val: {}", display_slot(v.as_deref()))?;
        }
        Ok(())
    }
}

fn display_slot(obj: Option<&dyn Object>) -> String {
    match obj {
        None => "<nil>".to_owned(),
        Some(o) => match o.downcast_ref::<ObjString>() {
            Some(s) => s.to_string(),
            None => format!("{:?}", o),
        },
    }
}

impl Object for ObjectMap {
    fn class(&self) -> &'static str {
        class_names::MAP
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_string(&self.name)?;
        w.write_collection(&self.entries, |w, (k, v)| {
            w.write_object_any(k.as_deref())?;
            w.write_object_any(v.as_deref())?;
            Ok(())
        })?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.name = r.read_string()?;
        self.entries = r.read_collection(|r| {
            let k = r.read_object_any()?;
            let v = r.read_object_any()?;
            Ok((k, v))
        })?;
        r.check_frame(&hdr, self.class())
    }
}
