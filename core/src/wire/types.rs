use thiserror::Error;

/// Errors raised while encoding or decoding the object stream.
///
/// Every decode error is fatal to the top-level call that observed it:
/// the stream position is unreliable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes remain than a primitive, array or frame requires.
    #[error("truncated stream at offset {pos}: need {need} bytes, have {have}")]
    TruncatedStream { pos: usize, need: usize, have: usize },

    /// Bytes consumed by an object differ from its declared byte count.
    #[error("frame mismatch for {class}: declared {declared} bytes, consumed {actual}")]
    FrameMismatch { class: String, declared: u32, actual: usize },

    /// Polymorphic slot names a class absent from the registry.
    #[error("unknown class {0:?}")]
    UnknownClass(String),

    /// Collection count read from the stream is negative.
    #[error("negative collection count {count} at offset {pos}")]
    NegativeCount { pos: usize, count: i32 },

    /// Polymorphic slot holds a class other than the field's static type.
    #[error("unexpected class: expected {expected}, found {found}")]
    UnexpectedClass { expected: String, found: String },

    /// Frame written by a newer schema version than this reader supports.
    #[error("unsupported version {version} for {class} (reader supports up to {supported})")]
    UnsupportedVersion { class: String, version: u16, supported: u16 },

    /// String payload is not valid UTF-8.
    #[error("invalid utf-8 string at offset {pos}")]
    InvalidUtf8 { pos: usize },

    /// Configured decode bound exceeded.
    #[error("{what} length {len} exceeds limit {max}")]
    LimitExceeded { what: &'static str, len: usize, max: usize },

    /// Polymorphic nesting deeper than the configured maximum.
    #[error("object nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    /// Length does not fit in its wire integer.
    #[error("{what} length {len} does not fit the wire format")]
    LengthOverflow { what: &'static str, len: usize },

    /// Seek target outside the stream.
    #[error("invalid seek to {pos} (stream length {len})")]
    InvalidSeek { pos: usize, len: usize },

    /// Input left over after a single top-level object.
    #[error("{remaining} trailing bytes after top-level object")]
    TrailingBytes { remaining: usize },
}

impl CodecError {
    /// Errors that indicate the input ended early or lies about its size.
    pub fn is_truncation(&self) -> bool {
        matches!(self, CodecError::TruncatedStream { .. } | CodecError::FrameMismatch { .. })
    }
}
