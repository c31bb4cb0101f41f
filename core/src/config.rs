//! config.rs
//! Decode-side policy knobs.
//!
//! Encoding has no configuration: the writer always produces the canonical
//! layout. Everything here bounds or relaxes what a reader accepts.

use crate::constants::{DEFAULT_MAX_COLLECTION_LEN, DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum nesting of polymorphic slots inside one top-level object.
    pub max_depth: usize,

    /// Upper bound on a decoded string payload, in bytes.
    pub max_string_len: usize,

    /// Upper bound on a decoded collection count.
    pub max_collection_len: usize,

    /// Accept frames written by a newer schema version and skip the
    /// trailing fields this reader does not know about.
    /// - `false` (default): such frames fail with `UnsupportedVersion`.
    pub allow_newer_versions: bool,

    /// Decode polymorphic slots of unregistered classes as `None`, skipping
    /// their bytes through the slot's own frame.
    /// - `false` (default): such slots fail with `UnknownClass`.
    pub skip_unknown_classes: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            allow_newer_versions: false,
            skip_unknown_classes: false,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader that tolerates version skew and unknown classes.
    pub fn lenient() -> Self {
        Self {
            allow_newer_versions: true,
            skip_unknown_classes: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_string_len(mut self, max: usize) -> Self {
        self.max_string_len = max;
        self
    }

    pub fn with_max_collection_len(mut self, max: usize) -> Self {
        self.max_collection_len = max;
        self
    }

    pub fn with_allow_newer_versions(mut self, allow: bool) -> Self {
        self.allow_newer_versions = allow;
        self
    }

    pub fn with_skip_unknown_classes(mut self, skip: bool) -> Self {
        self.skip_unknown_classes = skip;
        self
    }
}
