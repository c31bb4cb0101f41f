//! telemetry/snapshot.rs
//!
//! Immutable view of `CodecCounters` plus derived ratios, ready to be
//! serialized (the CLI prints it as JSON).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::CodecCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub frames_written: u64,
    pub frames_read: u64,
    pub objects_encoded: u64,
    pub objects_decoded: u64,
    pub null_slots: u64,
    pub skipped_objects: u64,
    pub skipped_bytes: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
    /// Share of processed bytes spent on frame headers.
    pub framing_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
}

impl CodecSnapshot {
    pub fn from(counters: &CodecCounters, elapsed: Duration) -> Self {
        let processed = counters.bytes_written + counters.bytes_read;

        let framing_ratio = if processed > 0 {
            (counters.framing_overhead_bytes() as f64 / processed as f64).min(1.0)
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            processed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            frames_written: counters.frames_written,
            frames_read: counters.frames_read,
            objects_encoded: counters.objects_encoded,
            objects_decoded: counters.objects_decoded,
            null_slots: counters.null_slots,
            skipped_objects: counters.skipped_objects,
            skipped_bytes: counters.skipped_bytes,
            bytes_written: counters.bytes_written,
            bytes_read: counters.bytes_read,
            framing_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
        }
    }

    /// Pretty JSON rendering for reports.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Invariants every snapshot must satisfy.
    pub fn sanity_check(&self) -> bool {
        self.framing_ratio <= 1.0 && self.skipped_objects <= self.frames_read
    }
}
