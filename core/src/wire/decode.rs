//! wire/decode.rs
//!
//! Read side of the primitive codec.
//!
//! Design notes:
//! - Zero-copy cursor over a borrowed byte slice.
//! - Every read checks the remaining length first and fails with
//!   `TruncatedStream` instead of panicking.
//! - The reader also carries the decode context (registry, config, nesting
//!   depth, counters) so nested objects see the same policy as their parent.

use byteorder::{BigEndian, ByteOrder};

use crate::config::CodecConfig;
use crate::registry::Registry;
use crate::telemetry::CodecCounters;
use crate::wire::types::CodecError;

/// Cursor over an encoded object stream.
#[derive(Debug)]
pub struct RBuffer<'a> {
    data: &'a [u8],
    pos: usize,
    pub(crate) registry: Option<&'a Registry>,
    pub(crate) config: CodecConfig,
    pub(crate) depth: usize,
    pub(crate) counters: CodecCounters,
}

impl<'a> RBuffer<'a> {
    /// Reader without a registry: polymorphic slots holding an object fail
    /// with `UnknownClass`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            registry: None,
            config: CodecConfig::default(),
            depth: 0,
            counters: CodecCounters::default(),
        }
    }

    pub fn with_registry(mut self, registry: &'a Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Counters accumulated by this reader.
    pub fn counters(&self) -> CodecCounters {
        let mut c = self.counters.clone();
        c.bytes_read = self.pos as u64;
        c
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Move the cursor to an absolute offset (the end is a valid target).
    pub fn seek(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.data.len() {
            return Err(CodecError::InvalidSeek { pos, len: self.data.len() });
        }
        self.pos = pos;
        Ok(())
    }

    /// Advance the cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    #[inline]
    pub(crate) fn ensure(&self, need: usize) -> Result<(), CodecError> {
        let have = self.remaining();
        if have < need {
            return Err(CodecError::TruncatedStream { pos: self.pos, need, have });
        }
        Ok(())
    }

    /// Borrow the next `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(n)?;
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.read_u8()? as i8)
    }

    /// Any non-zero byte reads as `true`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.read_u8()? != 0)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(BigEndian::read_u64(self.read_bytes(8)?))
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(BigEndian::read_f32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(BigEndian::read_f64(self.read_bytes(8)?))
    }

    /// Layout: `[len:u32][utf8 bytes]`.
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_u32()? as usize;
        if len > self.config.max_string_len {
            return Err(CodecError::LimitExceeded {
                what: "string",
                len,
                max: self.config.max_string_len,
            });
        }
        let start = self.pos;
        let raw = self.read_bytes(len)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8 { pos: start })
    }

    /// Read `n` big-endian i32 values written without a count.
    pub fn read_fast_array_i32(&mut self, n: usize) -> Result<Vec<i32>, CodecError> {
        let raw = self.read_bytes(checked_len(n, 4)?)?;
        let mut out = vec![0i32; n];
        BigEndian::read_i32_into(raw, &mut out);
        Ok(out)
    }

    pub fn read_fast_array_i64(&mut self, n: usize) -> Result<Vec<i64>, CodecError> {
        let raw = self.read_bytes(checked_len(n, 8)?)?;
        let mut out = vec![0i64; n];
        BigEndian::read_i64_into(raw, &mut out);
        Ok(out)
    }

    pub fn read_fast_array_f64(&mut self, n: usize) -> Result<Vec<f64>, CodecError> {
        let raw = self.read_bytes(checked_len(n, 8)?)?;
        let mut out = vec![0f64; n];
        BigEndian::read_f64_into(raw, &mut out);
        Ok(out)
    }
}

fn checked_len(n: usize, width: usize) -> Result<usize, CodecError> {
    n.checked_mul(width)
        .ok_or(CodecError::LengthOverflow { what: "array", len: n })
}
