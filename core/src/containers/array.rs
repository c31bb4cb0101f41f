use crate::wire::{CodecError, RBuffer, WBuffer};

/// Counted array of i64, written without a frame: `[n:i32][n × i64]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayL64 {
    pub data: Vec<i64>,
}

impl ArrayL64 {
    pub fn new(data: Vec<i64>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn at(&self, i: usize) -> Option<i64> {
        self.data.get(i).copied()
    }

    pub fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
        let start = w.pos();
        w.write_array_i64(&self.data)?;
        Ok(w.pos() - start)
    }

    pub fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
        self.data = r.read_array_i64()?;
        Ok(())
    }
}

impl From<Vec<i64>> for ArrayL64 {
    fn from(data: Vec<i64>) -> Self {
        Self { data }
    }
}
