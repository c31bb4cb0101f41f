//! containers/decode.rs
//!
//! Design notes:
//! - Negative counts are rejected before any element is read.
//! - Pre-allocation is capped by the bytes left in the input, so a hostile
//!   count cannot force a huge allocation; running out of input while
//!   reading elements still yields `TruncatedStream`.

use crate::wire::{CodecError, RBuffer};

impl<'a> RBuffer<'a> {
    /// Read and validate a collection count.
    pub fn read_count(&mut self) -> Result<usize, CodecError> {
        let pos = self.pos();
        let count = self.read_i32()?;
        if count < 0 {
            return Err(CodecError::NegativeCount { pos, count });
        }
        let count = count as usize;
        if count > self.config.max_collection_len {
            return Err(CodecError::LimitExceeded {
                what: "collection",
                len: count,
                max: self.config.max_collection_len,
            });
        }
        Ok(count)
    }

    /// Read `[count:i32]` then exactly `count` elements with `f`.
    pub fn read_collection<T, F>(&mut self, mut f: F) -> Result<Vec<T>, CodecError>
    where
        F: FnMut(&mut Self) -> Result<T, CodecError>,
    {
        let count = self.read_count()?;
        let mut out = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            out.push(f(self)?);
        }
        Ok(out)
    }

    pub fn read_array_i32(&mut self) -> Result<Vec<i32>, CodecError> {
        let n = self.read_count()?;
        self.read_fast_array_i32(n)
    }

    pub fn read_array_i64(&mut self) -> Result<Vec<i64>, CodecError> {
        let n = self.read_count()?;
        self.read_fast_array_i64(n)
    }

    pub fn read_array_f64(&mut self) -> Result<Vec<f64>, CodecError> {
        let n = self.read_count()?;
        self.read_fast_array_f64(n)
    }
}
