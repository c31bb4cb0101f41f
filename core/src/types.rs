use std::io;
use thiserror::Error;

use crate::{registry::RegistryError, wire::CodecError};

/// Unified error covering I/O, codec and registry failures.
/// - `From<T>` impls enable `?` across layers for file-level helpers.
#[derive(Debug, Error)]
pub enum OcdbError {
    /// I/O error while reading or writing the raw byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encode/decode failure inside the codec.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Registry construction failure.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
