use crate::constants::{BYTE_COUNT_LEN, FRAME_HEADER_LEN};

/// Reservation returned by `WBuffer::begin_object`.
///
/// Layout at `start`:
///
/// ```text
/// [ version (2) ]      start
/// [ byte_count (4) ]   start + 2, patched by end_object
/// [ payload ... ]      start + 6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a frame must be closed with end_object"]
pub struct FrameHandle {
    pub(crate) start: usize,
    pub(crate) count_pos: usize,
}

impl FrameHandle {
    /// Offset of the version tag.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset of the reserved byte-count field.
    pub fn count_pos(&self) -> usize {
        self.count_pos
    }

    /// Offset where counting begins (first payload byte).
    pub fn payload_start(&self) -> usize {
        self.count_pos + BYTE_COUNT_LEN
    }
}

/// Frame header as read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Schema version written by the encoder.
    pub version: u16,
    /// Declared payload length in bytes.
    pub byte_count: u32,
    /// Offset of the first payload byte (counting starts here).
    pub start: usize,
    /// Written by a newer schema than the reader's and accepted by policy.
    pub(crate) newer: bool,
}

impl FrameHeader {
    pub const LEN: usize = FRAME_HEADER_LEN;

    /// Offset one past the last byte of this object.
    pub fn end(&self) -> usize {
        self.start + self.byte_count as usize
    }

    /// Whether trailing fields unknown to this reader may be skipped.
    pub fn is_newer(&self) -> bool {
        self.newer
    }
}
