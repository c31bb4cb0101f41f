//! ocdb/id.rs
//!
//! Record identity: storage path, validity run range and version pair.
//!
//! Design notes:
//! - `Path` and `RunRange` are nested with fixed types, so they are written
//!   as plain frames (no class name).
//! - Derived fields of `Path` (levels, validity, wildcard) are stored on the
//!   wire as written; `Path::new` is the only place they are computed.

use std::fmt;

use crate::constants::class_names;
use crate::object::{Object, ObjectBase};
use crate::wire::{CodecError, RBuffer, WBuffer};

// ## 1️⃣ Path

/// Three-level storage path, e.g. `MUON/Calib/Pedestals`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub base: ObjectBase,
    pub path: String,
    pub levels: [String; 3],
    pub valid: bool,
    pub wildcard: bool,
}

impl Path {
    pub const VERSION: u16 = 1;

    /// Parse a `/`-separated path.
    ///
    /// A path is valid when it has exactly three non-empty levels made of
    /// ASCII alphanumerics, `_` or `*`. Any `*` marks it as a wildcard.
    pub fn new(path: &str) -> Self {
        let parts: Vec<&str> = path.split('/').collect();
        let valid = parts.len() == 3 && parts.iter().all(|l| is_level(l));
        let wildcard = path.contains('*');

        let mut levels: [String; 3] = Default::default();
        for (slot, part) in levels.iter_mut().zip(parts.iter()) {
            *slot = (*part).to_owned();
        }

        Self { base: ObjectBase::default(), path: path.to_owned(), levels, valid, wildcard }
    }

    pub fn level(&self, i: usize) -> Option<&str> {
        self.levels.get(i).map(String::as_str)
    }

    /// Whether `other` is selected by this path.
    ///
    /// A level equal to `*` matches anything; a level ending in `*` matches
    /// by prefix. Invalid paths never match.
    pub fn matches(&self, other: &Path) -> bool {
        if !self.valid || !other.valid {
            return false;
        }
        self.levels
            .iter()
            .zip(other.levels.iter())
            .all(|(pat, lvl)| match pat.strip_suffix('*') {
                Some(prefix) => lvl.starts_with(prefix),
                None => pat == lvl,
            })
    }
}

fn is_level(level: &str) -> bool {
    !level.is_empty()
        && level
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '*')
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Path{{Path: {:?}, Level0: {:?}, Level1: {:?}, Level2: {:?}, Valid: {}, WildCard: {}}}",
            self.path, self.levels[0], self.levels[1], self.levels[2], self.valid, self.wildcard
        )
    }
}

impl Object for Path {
    fn class(&self) -> &'static str {
        class_names::CDB_PATH
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_string(&self.path)?;
        for level in &self.levels {
            w.write_string(level)?;
        }
        w.write_bool(self.valid);
        w.write_bool(self.wildcard);
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.path = r.read_string()?;
        for level in self.levels.iter_mut() {
            *level = r.read_string()?;
        }
        self.valid = r.read_bool()?;
        self.wildcard = r.read_bool()?;
        r.check_frame(&hdr, self.class())
    }
}

// ## 2️⃣ RunRange

/// Inclusive range of run numbers a record is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunRange {
    pub base: ObjectBase,
    pub first: i32,
    pub last: i32,
}

impl RunRange {
    pub const VERSION: u16 = 1;

    /// Open upper bound used by "valid from run N onwards" entries.
    pub const INFINITY: i32 = 999_999_999;

    pub fn new(first: i32, last: i32) -> Self {
        Self { base: ObjectBase::default(), first, last }
    }

    pub fn is_valid(&self) -> bool {
        self.first >= 0 && self.last >= self.first
    }

    pub fn contains(&self, run: i32) -> bool {
        self.is_valid() && self.first <= run && run <= self.last
    }

    pub fn overlaps(&self, other: &RunRange) -> bool {
        self.is_valid() && other.is_valid() && self.first <= other.last && other.first <= self.last
    }
}

impl fmt::Display for RunRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunRange{{First: {}, Last: {}}}", self.first, self.last)
    }
}

impl Object for RunRange {
    fn class(&self) -> &'static str {
        class_names::CDB_RUN_RANGE
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_i32(self.first);
        w.write_i32(self.last);
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.first = r.read_i32()?;
        self.last = r.read_i32()?;
        r.check_frame(&hdr, self.class())
    }
}

// ## 3️⃣ Id

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Id {
    pub base: ObjectBase,
    pub path: Path,
    pub runs: RunRange,
    pub version: i32,
    pub sub_version: i32,
    /// Last storage the entry was fetched from.
    pub last_storage: String,
}

impl Id {
    pub const VERSION: u16 = 1;

    pub fn new(path: &str, runs: RunRange, version: i32, sub_version: i32) -> Self {
        Self {
            base: ObjectBase::default(),
            path: Path::new(path),
            runs,
            version,
            sub_version,
            last_storage: String::new(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AliCDBId{{Path: {}, RunRange: {}, Version: 0x{:x}, SubVersion: 0x{:x}, Last: {:?}}}",
            self.path, self.runs, self.version, self.sub_version, self.last_storage
        )
    }
}

impl Object for Id {
    fn class(&self) -> &'static str {
        class_names::CDB_ID
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_object(&self.path)?;
        w.write_object(&self.runs)?;
        w.write_i32(self.version);
        w.write_i32(self.sub_version);
        w.write_string(&self.last_storage)?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        r.read_object(&mut self.path)?;
        r.read_object(&mut self.runs)?;
        self.version = r.read_i32()?;
        self.sub_version = r.read_i32()?;
        self.last_storage = r.read_string()?;
        r.check_frame(&hdr, self.class())
    }
}
