//! ocdb/mod.rs
//! OCDB record graph: entry, identity, metadata and MUON calibration
//! payloads, plus the class registry that knows all of them.
//!
//! Notes:
//! - Every record is version 1; class names are the ones found on the wire.
//! - Records are plain structs with public fields; invariants such as path
//!   validity are computed at construction and stored as decoded.

pub mod entry;
pub mod factory;
pub mod id;
pub mod metadata;
pub mod muon;

pub use entry::Entry;
pub use factory::{build_registry, default_registry, register_classes};
pub use id::{Id, Path, RunRange};
pub use metadata::MetaData;
pub use muon::{MpExMap, Muon2DMap, MuonCalibParamNd, MuonVCalibParam, MuonVStore};
