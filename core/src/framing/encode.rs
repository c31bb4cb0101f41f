//! framing/encode.rs
//!
//! Frame writing: the version tag goes out immediately, the byte count is
//! reserved as four zero bytes and patched once the payload is complete.

use tracing::trace;

use crate::framing::types::FrameHandle;
use crate::wire::{CodecError, WBuffer};

impl WBuffer {
    /// Write the version tag and reserve the byte-count field.
    pub fn begin_object(&mut self, version: u16) -> FrameHandle {
        let start = self.pos();
        self.write_u16(version);
        let count_pos = self.pos();
        self.write_u32(0);
        FrameHandle { start, count_pos }
    }

    /// Patch the byte count reserved by `begin_object`.
    ///
    /// # Returns
    /// - Total encoded size of the object, header included.
    /// - `LengthOverflow` if the payload does not fit in a u32 count.
    pub fn end_object(&mut self, handle: FrameHandle, class: &str) -> Result<usize, CodecError> {
        let end = self.pos();
        let payload = end - handle.payload_start();
        let count = u32::try_from(payload)
            .map_err(|_| CodecError::LengthOverflow { what: "object", len: payload })?;
        self.patch_u32(handle.count_pos, count);

        self.counters.frames_written += 1;
        trace!(class, byte_count = count, start = handle.start, "closed frame");

        Ok(end - handle.start)
    }
}
