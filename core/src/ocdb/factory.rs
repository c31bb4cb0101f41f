//! ocdb/factory.rs
//!
//! Registration of every class this crate can decode.
//!
//! Design notes:
//! - `register_classes` only adds entries, so callers can mix in their own
//!   classes before building.
//! - `default_registry` is built on first use and read-only afterwards.
//!   A failed build is cached as the error, never as an empty table.

use std::sync::OnceLock;

use tracing::debug;

use crate::containers::{ObjArray, ObjString, ObjectMap};
use crate::object::ObjectBase;
use crate::ocdb::{
    Entry, Id, MetaData, MpExMap, Muon2DMap, MuonCalibParamNd, MuonVCalibParam, MuonVStore, Path,
    RunRange,
};
use crate::registry::{Registry, RegistryBuilder, RegistryError};

/// Add the container classes and every OCDB record class to `builder`.
pub fn register_classes(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register_type::<ObjectBase>()?
        .register_type::<ObjString>()?
        .register_type::<ObjArray>()?
        .register_type::<ObjectMap>()?
        .register_type::<Entry>()?
        .register_type::<Id>()?
        .register_type::<Path>()?
        .register_type::<RunRange>()?
        .register_type::<MetaData>()?
        .register_type::<MuonVStore>()?
        .register_type::<Muon2DMap>()?
        .register_type::<MpExMap>()?
        .register_type::<MuonVCalibParam>()?
        .register_type::<MuonCalibParamNd>()?;
    Ok(())
}

/// Fresh registry holding every known class, checked with
/// `RegistryBuilder::validate` before it is frozen.
pub fn build_registry() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    register_classes(&mut builder)?;
    builder.validate()?;
    let registry = builder.build();
    debug!(classes = registry.len(), "built OCDB class registry");
    Ok(registry)
}

static DEFAULT_REGISTRY: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

/// Process-wide registry, initialised exactly once.
///
/// A construction failure is kept and returned to every caller.
pub fn default_registry() -> Result<&'static Registry, RegistryError> {
    DEFAULT_REGISTRY
        .get_or_init(build_registry)
        .as_ref()
        .map_err(Clone::clone)
}
