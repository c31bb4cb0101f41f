//! telemetry/counters.rs
//! Mutable counters updated while encoding or decoding one stream.

use std::ops::AddAssign;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct CodecCounters {
    pub frames_written: u64,
    pub frames_read: u64,
    pub objects_encoded: u64,
    pub objects_decoded: u64,
    pub null_slots: u64,
    pub skipped_objects: u64,
    pub skipped_bytes: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
}

impl CodecCounters {
    /// Fold another stream's counters into this one.
    pub fn merge(&mut self, other: &CodecCounters) {
        self.frames_written += other.frames_written;
        self.frames_read += other.frames_read;
        self.objects_encoded += other.objects_encoded;
        self.objects_decoded += other.objects_decoded;
        self.null_slots += other.null_slots;
        self.skipped_objects += other.skipped_objects;
        self.skipped_bytes += other.skipped_bytes;
        self.bytes_written += other.bytes_written;
        self.bytes_read += other.bytes_read;
    }

    /// Framing overhead in bytes: six header bytes per frame.
    pub fn framing_overhead_bytes(&self) -> u64 {
        (self.frames_written + self.frames_read) * crate::constants::FRAME_HEADER_LEN as u64
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
