//! telemetry/mod.rs
//! Codec counters and immutable snapshots.
//!
//! Notes:
//! - Counters live inside each `WBuffer` / `RBuffer`: no locks, no atomics.
//! - Parallel decoders merge their counters once at the end.
//! - Snapshots are serde-serializable for reports.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
