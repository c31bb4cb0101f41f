use std::sync::Arc;
use thiserror::Error;

use crate::object::Object;

/// Zero-argument constructor of a blank, mutable instance.
pub type ClassFactory = Arc<dyn Fn() -> Box<dyn Object> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The empty name marks a null polymorphic slot and cannot be registered.
    #[error("class name {0:?} is reserved")]
    ReservedName(String),

    /// The factory produced an instance reporting another class name.
    #[error("factory for {registered} builds {built}")]
    ClassNameMismatch { registered: String, built: String },
}
