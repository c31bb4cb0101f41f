//! registry/table.rs
//! Builder and frozen lookup table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::constants::NULL_CLASS;
use crate::object::Object;
use crate::registry::types::{ClassFactory, RegistryError};
use crate::wire::CodecError;

/// Mutable registration phase.
#[derive(Default)]
pub struct RegistryBuilder {
    factories: HashMap<String, ClassFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `factory` under `class`, replacing any previous entry.
    pub fn register<F>(&mut self, class: &str, factory: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn() -> Box<dyn Object> + Send + Sync + 'static,
    {
        if class == NULL_CLASS {
            return Err(RegistryError::ReservedName(class.to_owned()));
        }
        if self.factories.insert(class.to_owned(), Arc::new(factory)).is_some() {
            debug!(class, "replaced class factory");
        } else {
            debug!(class, "registered class factory");
        }
        Ok(self)
    }

    /// Register `T` under the class name its default instance reports.
    pub fn register_type<T>(&mut self) -> Result<&mut Self, RegistryError>
    where
        T: Object + Default,
    {
        let class = T::default().class();
        self.register(class, || Box::new(T::default()) as Box<dyn Object>)
    }

    /// Verify that every factory builds an instance of its own class.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (name, factory) in &self.factories {
            let built = factory().class();
            if built != name {
                return Err(RegistryError::ClassNameMismatch {
                    registered: name.clone(),
                    built: built.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Freeze the table. No registration is possible afterwards.
    pub fn build(self) -> Registry {
        debug!(classes = self.factories.len(), "class registry frozen");
        Registry { factories: self.factories }
    }
}

/// Read-only class table used during decode.
pub struct Registry {
    factories: HashMap<String, ClassFactory>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with no classes.
    pub fn empty() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Build a fresh blank instance of `class`.
    pub fn resolve(&self, class: &str) -> Result<Box<dyn Object>, CodecError> {
        self.factories
            .get(class)
            .map(|factory| factory())
            .ok_or_else(|| CodecError::UnknownClass(class.to_owned()))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names in sorted order.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("classes", &self.class_names())
            .finish()
    }
}
