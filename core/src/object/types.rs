use std::any::Any;
use std::fmt;

use crate::wire::{CodecError, RBuffer, WBuffer};

/// A named, versioned record that encodes itself into a frame.
///
/// Field order inside `marshal` and `unmarshal` is part of the wire format:
/// both must walk the same fields in the same order. Changing it is a
/// breaking change that requires a version bump.
pub trait Object: ObjectDyn + fmt::Debug + Send + Sync + 'static {
    /// Stable class name, written in polymorphic slots.
    fn class(&self) -> &'static str;

    /// Schema version written in the frame header.
    fn version(&self) -> u16;

    /// Encode the whole object, frame included.
    ///
    /// # Returns
    /// - Total number of bytes written for this object.
    fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError>;

    /// Decode the whole object, frame included, overwriting every field.
    fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError>;
}

/// Dynamic helpers for `dyn Object`: downcasting, cloning, equality.
///
/// Implemented for every `Object + Clone + PartialEq`; never implement by hand.
pub trait ObjectDyn: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_object(&self) -> Box<dyn Object>;
    fn eq_object(&self, other: &dyn Object) -> bool;
}

impl<T> ObjectDyn for T
where
    T: Object + Clone + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn Object) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |o| self == o)
    }
}

impl dyn Object {
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Take ownership of the concrete record, or get the box back on mismatch.
    pub fn downcast<T: Object>(self: Box<Self>) -> Result<Box<T>, Box<dyn Object>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(t) => Ok(t),
                Err(_) => unreachable!("type checked above"),
            }
        } else {
            Err(self)
        }
    }
}

impl PartialEq for dyn Object {
    fn eq(&self, other: &dyn Object) -> bool {
        self.eq_object(other)
    }
}

impl Clone for Box<dyn Object> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}
