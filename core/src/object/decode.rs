//! object/decode.rs
//!
//! Polymorphic slot decoding. The class name is read first; the null
//! sentinel ends the slot with no frame. Any other name is resolved through
//! the reader's registry and the fresh instance decodes its own frame.

use tracing::{trace, warn};

use crate::constants::NULL_CLASS;
use crate::object::types::Object;
use crate::wire::{CodecError, RBuffer};

impl<'a> RBuffer<'a> {
    /// Decode a nested record of fixed type in place.
    pub fn read_object(&mut self, obj: &mut dyn Object) -> Result<(), CodecError> {
        obj.unmarshal(self)?;
        self.counters.objects_decoded += 1;
        Ok(())
    }

    /// Decode a polymorphic slot.
    ///
    /// # Returns
    /// - `Ok(None)` for the null sentinel, or for an unknown class when
    ///   `skip_unknown_classes` is set.
    /// - `Err(UnknownClass)` for an unregistered class otherwise. The slot's
    ///   frame has not been consumed; the caller may recover through the
    ///   enclosing frame's byte count.
    pub fn read_object_any(&mut self) -> Result<Option<Box<dyn Object>>, CodecError> {
        let class = self.read_string()?;
        if class == NULL_CLASS {
            self.counters.null_slots += 1;
            return Ok(None);
        }

        let resolved = match self.registry {
            Some(registry) => registry.resolve(&class),
            None => Err(CodecError::UnknownClass(class.clone())),
        };
        let mut obj = match resolved {
            Ok(obj) => obj,
            Err(_) if self.config.skip_unknown_classes => {
                let skipped = self.skip_object()?;
                warn!(class = %class, byte_count = skipped.byte_count, "skipped object of unknown class");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if self.depth >= self.config.max_depth {
            return Err(CodecError::DepthExceeded { max: self.config.max_depth });
        }
        self.depth += 1;
        trace!(class = %class, depth = self.depth, "decoding polymorphic slot");
        let res = self.read_object(obj.as_mut());
        self.depth -= 1;
        res?;

        Ok(Some(obj))
    }

    /// Decode a polymorphic slot whose concrete type is statically known.
    pub fn read_object_as<T: Object>(&mut self) -> Result<Option<Box<T>>, CodecError> {
        match self.read_object_any()? {
            None => Ok(None),
            Some(obj) => {
                let found = obj.class();
                obj.downcast::<T>().map(Some).map_err(|_| CodecError::UnexpectedClass {
                    expected: std::any::type_name::<T>().to_owned(),
                    found: found.to_owned(),
                })
            }
        }
    }
}
