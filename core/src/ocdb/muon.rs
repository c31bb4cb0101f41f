//! ocdb/muon.rs
//!
//! MUON calibration payloads: a 2D store keyed by packed detection-element
//! and manu identifiers, and the N-dimensional parameter block it holds.
//!
//! Design notes:
//! - `MuonVStore` and `MuonVCalibParam` are abstract bases with no fields
//!   of their own; each still gets its own frame.
//! - The optimize flag and the reserved byte before the value array carry
//!   no meaning here. They are kept so a decoded record re-encodes to the
//!   same bytes.

use std::fmt;

use tracing::trace;

use crate::constants::{class_names, RESERVED_ARRAY_MARKER};
use crate::containers::{ArrayL64, ObjArray};
use crate::object::{Object, ObjectBase};
use crate::wire::{CodecError, RBuffer, WBuffer};

// ## 1️⃣ Abstract bases

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuonVStore {
    pub base: ObjectBase,
}

impl MuonVStore {
    pub const VERSION: u16 = 1;
}

impl Object for MuonVStore {
    fn class(&self) -> &'static str {
        class_names::MUON_V_STORE
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        r.check_frame(&hdr, self.class())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuonVCalibParam {
    pub base: ObjectBase,
}

impl MuonVCalibParam {
    pub const VERSION: u16 = 1;
}

impl Object for MuonVCalibParam {
    fn class(&self) -> &'static str {
        class_names::MUON_V_CALIB_PARAM
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        r.check_frame(&hdr, self.class())
    }
}

// ## 2️⃣ MpExMap

/// Objects addressed by packed 64-bit keys. `keys[i]` addresses `objs[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MpExMap {
    pub base: ObjectBase,
    pub objs: ObjArray,
    pub keys: ArrayL64,
}

impl MpExMap {
    pub const VERSION: u16 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: i64, obj: impl Object) {
        self.objs.push(obj);
        self.keys.data.push(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: i64) -> Option<&dyn Object> {
        let i = self.keys.data.iter().position(|k| *k == key)?;
        self.objs.at(i)
    }
}

impl fmt::Display for MpExMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExMap{{Objs: [")?;
        for (i, obj) in self.objs.objs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match obj.as_deref().and_then(|o| o.downcast_ref::<MuonCalibParamNd>()) {
                Some(p) => write!(f, "{}", p)?,
                None => match obj {
                    Some(o) => write!(f, "{:?}", o)?,
                    None => write!(f, "<nil>")?,
                },
            }
        }
        write!(f, "], Keys: {:?}}}", self.keys.data)
    }
}

impl Object for MpExMap {
    fn class(&self) -> &'static str {
        class_names::MP_EX_MAP
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_object(&self.objs)?;
        self.keys.marshal(w)?;
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        r.read_object(&mut self.objs)?;
        self.keys.unmarshal(r)?;
        r.check_frame(&hdr, self.class())
    }
}

// ## 3️⃣ Muon2DMap

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Muon2DMap {
    pub base: MuonVStore,
    pub exmap: Option<Box<MpExMap>>,
    pub optimize: bool,
}

impl Muon2DMap {
    pub const VERSION: u16 = 1;

    pub fn new(exmap: MpExMap) -> Self {
        Self { exmap: Some(Box::new(exmap)), ..Self::default() }
    }
}

impl fmt::Display for Muon2DMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exmap {
            Some(m) => write!(f, "MUON2DMap{{Opt: {}, Map: {}}}", self.optimize, m),
            None => write!(f, "MUON2DMap{{Opt: {}, Map: <nil>}}", self.optimize),
        }
    }
}

impl Object for Muon2DMap {
    fn class(&self) -> &'static str {
        class_names::MUON_2D_MAP
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_object_any(self.exmap.as_deref().map(|m| m as &dyn Object))?;
        w.write_bool(self.optimize);
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.exmap = r.read_object_as::<MpExMap>()?;
        self.optimize = r.read_bool()?;
        r.check_frame(&hdr, self.class())
    }
}

// ## 4️⃣ MuonCalibParamNd

/// `size` channels of `dimension` values each, stored channel-major.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MuonCalibParamNd {
    pub base: MuonVCalibParam,
    pub dimension: i32,
    pub size: i32,
    pub values: Vec<f64>,
}

impl MuonCalibParamNd {
    pub const VERSION: u16 = 1;

    /// Parameter set of `size` channels filled with `fill`.
    ///
    /// Returns `None` when either extent is negative or their product does not fit
    /// the `i32` value count of the wire layout.
    pub fn new(dimension: i32, size: i32, fill: f64) -> Option<Self> {
        if dimension < 0 || size < 0 {
            return None;
        }
        let n = usize::try_from(dimension.checked_mul(size)?).ok()?;
        Some(Self { base: MuonVCalibParam::default(), dimension, size, values: vec![fill; n] })
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        let dim = usize::try_from(self.dimension).ok()?;
        if j >= dim {
            return None;
        }
        i.checked_mul(dim)?.checked_add(j)
    }

    /// Value of channel `i`, dimension `j`.
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(self.index(i, j)?).copied()
    }

    pub fn set_value(&mut self, i: usize, j: usize, v: f64) -> bool {
        let Some(idx) = self.index(i, j) else {
            return false;
        };
        match self.values.get_mut(idx) {
            Some(slot) => {
                *slot = v;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for MuonCalibParamNd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibParamND{{Dim: {}, Size: {}, N: {}, Values: {:?}}}",
            self.dimension,
            self.size,
            self.values.len(),
            self.values
        )
    }
}

impl Object for MuonCalibParamNd {
    fn class(&self) -> &'static str {
        class_names::MUON_CALIB_PARAM_ND
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let n = i32::try_from(self.values.len())
            .map_err(|_| CodecError::LengthOverflow { what: "calibration values", len: self.values.len() })?;

        let frame = w.begin_object(self.version());
        w.write_object(&self.base)?;
        w.write_i32(self.dimension);
        w.write_i32(self.size);
        w.write_i32(n);
        w.write_i8(RESERVED_ARRAY_MARKER);
        w.write_fast_array_f64(&self.values);
        w.end_object(frame, self.class())
    }

    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        let hdr = r.read_version(self.class(), Self::VERSION)?;
        r.read_object(&mut self.base)?;
        self.dimension = r.read_i32()?;
        self.size = r.read_i32()?;

        let pos = r.pos();
        let n = r.read_i32()?;
        if n < 0 {
            return Err(CodecError::NegativeCount { pos, count: n });
        }
        let marker = r.read_i8()?;
        if marker != RESERVED_ARRAY_MARKER {
            trace!(marker, "unexpected reserved byte before calibration values");
        }
        self.values = r.read_fast_array_f64(n as usize)?;
        r.check_frame(&hdr, self.class())
    }
}
