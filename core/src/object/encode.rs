//! object/encode.rs
//!
//! Polymorphic slot layout:
//!
//! ```text
//! present: [ class_len (4) ][ class name ][ version (2) ][ byte_count (4) ][ payload ]
//! null:    [ 0x00000000 ]
//! ```

use tracing::trace;

use crate::constants::NULL_CLASS;
use crate::object::types::Object;
use crate::wire::{CodecError, WBuffer};

impl WBuffer {
    /// Encode a nested record of fixed type. Always framed.
    pub fn write_object(&mut self, obj: &dyn Object) -> Result<usize, CodecError> {
        let n = obj.marshal(self)?;
        self.counters.objects_encoded += 1;
        Ok(n)
    }

    /// Encode a polymorphic slot: class name, then the object's own frame.
    ///
    /// # Returns
    /// - Bytes written for the slot, class name included.
    pub fn write_object_any(&mut self, obj: Option<&dyn Object>) -> Result<usize, CodecError> {
        let start = self.pos();
        match obj {
            None => {
                self.write_string(NULL_CLASS)?;
                self.counters.null_slots += 1;
                trace!("null polymorphic slot");
            }
            Some(obj) => {
                self.write_string(obj.class())?;
                self.write_object(obj)?;
            }
        }
        Ok(self.pos() - start)
    }
}
