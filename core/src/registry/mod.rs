//! registry/mod.rs
//! Class registry: class name → blank-instance factory.
//!
//! Lifecycle:
//! - A `RegistryBuilder` is filled during a single initialization phase.
//! - `build()` freezes it into a `Registry`, which is read-only, `Send + Sync`
//!   and shared by every decoder without locking.

pub mod types;
pub mod table;

pub use types::*;
pub use table::*;
