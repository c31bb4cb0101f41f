//! constants.rs
//! Wire-level constants shared by every layer of the codec.
//!
//! Byte order is big-endian for every multi-byte integer and float.

/// Size of the version tag at the start of every frame.
pub const VERSION_LEN: usize = 2;

/// Size of the byte-count field that follows the version tag.
pub const BYTE_COUNT_LEN: usize = 4;

/// Full frame header size: `[version:u16][byte_count:u32]`.
pub const FRAME_HEADER_LEN: usize = VERSION_LEN + BYTE_COUNT_LEN;

/// Class name written in a polymorphic slot that holds no object.
/// Encodes as a zero length prefix with no bytes and no frame.
pub const NULL_CLASS: &str = "";

/// Placeholder byte written before the calibration value array.
pub const RESERVED_ARRAY_MARKER: i8 = 1;

/// Defaults for `CodecConfig`.
pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024; // 16 MiB
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1 << 24;

/// Class names of the built-in container and base records.
pub mod class_names {
    pub const OBJECT: &str = "TObject";
    pub const OBJ_STRING: &str = "TObjString";
    pub const OBJ_ARRAY: &str = "TObjArray";
    pub const MAP: &str = "TMap";

    pub const CDB_ENTRY: &str = "AliCDBEntry";
    pub const CDB_ID: &str = "AliCDBId";
    pub const CDB_PATH: &str = "AliCDBPath";
    pub const CDB_RUN_RANGE: &str = "AliCDBRunRange";
    pub const CDB_META_DATA: &str = "AliCDBMetaData";

    pub const MUON_2D_MAP: &str = "AliMUON2DMap";
    pub const MUON_V_STORE: &str = "AliMUONVStore";
    pub const MP_EX_MAP: &str = "AliMpExMap";
    pub const MUON_CALIB_PARAM_ND: &str = "AliMUONCalibParamND";
    pub const MUON_V_CALIB_PARAM: &str = "AliMUONVCalibParam";
}
