//! wire/encode.rs
//!
//! Write side of the primitive codec.
//!
//! Design notes:
//! - Appends to an in-memory buffer so frames can back-patch their byte count.
//! - Every multi-byte value is big-endian.
//! - Primitive writes cannot fail; only length prefixes that overflow their
//!   wire integer return an error.

use std::io;

use byteorder::{BigEndian, ByteOrder};

use crate::telemetry::CodecCounters;
use crate::wire::types::CodecError;

/// Growable output stream.
#[derive(Debug, Default)]
pub struct WBuffer {
    buf: Vec<u8>,
    pub(crate) counters: CodecCounters,
}

impl WBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            counters: CodecCounters::default(),
        }
    }

    /// Current write position (number of bytes written so far).
    #[inline]
    pub fn pos(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Counters accumulated by this writer.
    pub fn counters(&self) -> CodecCounters {
        let mut c = self.counters.clone();
        c.bytes_written = self.buf.len() as u64;
        c
    }

    /// Copy the buffered bytes into an external sink.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(&self.buf)
    }

    /// Append raw bytes at the current position.
    #[inline]
    pub fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    /// Overwrite four bytes at `at` with a big-endian u32.
    /// `at` must point inside bytes already written.
    pub(crate) fn patch_u32(&mut self, at: usize, v: u32) {
        BigEndian::write_u32(&mut self.buf[at..at + 4], v);
    }

    #[inline]
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    #[inline]
    pub fn write_i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    #[inline]
    pub fn write_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    #[inline]
    pub fn write_u16(&mut self, v: u16) {
        let mut b = [0u8; 2];
        BigEndian::write_u16(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_i16(&mut self, v: i16) {
        let mut b = [0u8; 2];
        BigEndian::write_i16(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_u32(&mut self, v: u32) {
        let mut b = [0u8; 4];
        BigEndian::write_u32(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_i32(&mut self, v: i32) {
        let mut b = [0u8; 4];
        BigEndian::write_i32(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_u64(&mut self, v: u64) {
        let mut b = [0u8; 8];
        BigEndian::write_u64(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_i64(&mut self, v: i64) {
        let mut b = [0u8; 8];
        BigEndian::write_i64(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_f32(&mut self, v: f32) {
        let mut b = [0u8; 4];
        BigEndian::write_f32(&mut b, v);
        self.write_bytes(&b);
    }

    #[inline]
    pub fn write_f64(&mut self, v: f64) {
        let mut b = [0u8; 8];
        BigEndian::write_f64(&mut b, v);
        self.write_bytes(&b);
    }

    /// Layout: `[len:u32][utf8 bytes]`.
    pub fn write_string(&mut self, s: &str) -> Result<(), CodecError> {
        let len = u32::try_from(s.len())
            .map_err(|_| CodecError::LengthOverflow { what: "string", len: s.len() })?;
        self.write_u32(len);
        self.write_bytes(s.as_bytes());
        Ok(())
    }

    /// Flat sequence without a count; the reader must know `vs.len()`.
    pub fn write_fast_array_i32(&mut self, vs: &[i32]) {
        let mut b = vec![0u8; vs.len() * 4];
        BigEndian::write_i32_into(vs, &mut b);
        self.write_bytes(&b);
    }

    pub fn write_fast_array_i64(&mut self, vs: &[i64]) {
        let mut b = vec![0u8; vs.len() * 8];
        BigEndian::write_i64_into(vs, &mut b);
        self.write_bytes(&b);
    }

    pub fn write_fast_array_f64(&mut self, vs: &[f64]) {
        let mut b = vec![0u8; vs.len() * 8];
        BigEndian::write_f64_into(vs, &mut b);
        self.write_bytes(&b);
    }
}
