//! framing/decode.rs
//!
//! Frame reading and verification.
//!
//! Design notes:
//! - A header whose byte count runs past the end of input is rejected
//!   up front as `TruncatedStream`.
//! - `check_frame` must run after every object, nested ones included:
//!   the layout is positional, so the count is the only guard against
//!   reading garbage after a schema drift.
//! - Frames from a newer schema may be accepted by policy; their unknown
//!   trailing fields are then skipped by `check_frame`.

use tracing::{debug, warn};

use crate::framing::types::FrameHeader;
use crate::wire::{CodecError, RBuffer};

impl<'a> RBuffer<'a> {
    /// Read `[version][byte_count]` and validate the count against the input.
    pub fn read_frame_header(&mut self) -> Result<FrameHeader, CodecError> {
        let version = self.read_u16()?;
        let byte_count = self.read_u32()?;
        let start = self.pos();

        self.ensure(byte_count as usize)?;
        self.counters.frames_read += 1;

        Ok(FrameHeader { version, byte_count, start, newer: false })
    }

    /// Read a frame header and apply the version policy for `class`.
    ///
    /// `supported` is the newest schema version this reader understands.
    pub fn read_version(&mut self, class: &str, supported: u16) -> Result<FrameHeader, CodecError> {
        let mut header = self.read_frame_header()?;
        if header.version > supported {
            if !self.config.allow_newer_versions {
                return Err(CodecError::UnsupportedVersion {
                    class: class.to_owned(),
                    version: header.version,
                    supported,
                });
            }
            debug!(class, version = header.version, supported, "reading newer schema version");
            header.newer = true;
        }
        Ok(header)
    }

    /// Verify that exactly `header.byte_count` bytes were consumed since the
    /// header was read.
    pub fn check_frame(&mut self, header: &FrameHeader, class: &str) -> Result<(), CodecError> {
        let actual = self.pos().saturating_sub(header.start);
        let declared = header.byte_count as usize;

        if actual == declared {
            return Ok(());
        }

        if header.is_newer() && actual < declared {
            let skipped = declared - actual;
            debug!(class, skipped, "skipping fields unknown to this reader");
            self.seek(header.end())?;
            self.counters.skipped_bytes += skipped as u64;
            return Ok(());
        }

        warn!(class, declared, actual, "frame byte count mismatch");
        Err(CodecError::FrameMismatch {
            class: class.to_owned(),
            declared: header.byte_count,
            actual,
        })
    }

    /// Move to the end of a frame whose header was already read.
    pub fn skip_to_frame_end(&mut self, header: &FrameHeader) -> Result<(), CodecError> {
        let end = header.end();
        if end < self.pos() {
            return Err(CodecError::InvalidSeek { pos: end, len: self.len() });
        }
        self.counters.skipped_bytes += (end - self.pos()) as u64;
        self.seek(end)
    }

    /// Skip one complete framed object starting at the cursor.
    ///
    /// # Returns
    /// - The skipped object's header.
    pub fn skip_object(&mut self) -> Result<FrameHeader, CodecError> {
        let header = self.read_frame_header()?;
        self.skip_to_frame_end(&header)?;
        self.counters.skipped_objects += 1;
        Ok(header)
    }
}
