use crate::wire::{CodecError, WBuffer};

impl WBuffer {
    /// Write a collection count. Fails if it does not fit in an i32.
    pub fn write_count(&mut self, count: usize) -> Result<(), CodecError> {
        let n = i32::try_from(count)
            .map_err(|_| CodecError::LengthOverflow { what: "collection", len: count })?;
        self.write_i32(n);
        Ok(())
    }

    /// Layout: `[count:i32][element]*count`, elements written by `f` in order.
    pub fn write_collection<T, F>(&mut self, items: &[T], mut f: F) -> Result<(), CodecError>
    where
        F: FnMut(&mut Self, &T) -> Result<(), CodecError>,
    {
        self.write_count(items.len())?;
        for item in items {
            f(self, item)?;
        }
        Ok(())
    }

    pub fn write_array_i32(&mut self, vs: &[i32]) -> Result<(), CodecError> {
        self.write_count(vs.len())?;
        self.write_fast_array_i32(vs);
        Ok(())
    }

    pub fn write_array_i64(&mut self, vs: &[i64]) -> Result<(), CodecError> {
        self.write_count(vs.len())?;
        self.write_fast_array_i64(vs);
        Ok(())
    }

    pub fn write_array_f64(&mut self, vs: &[f64]) -> Result<(), CodecError> {
        self.write_count(vs.len())?;
        self.write_fast_array_f64(vs);
        Ok(())
    }
}
