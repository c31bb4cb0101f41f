//! codec.rs: top-level encode/decode API.
//!
//! Two stream shapes:
//! - untagged: one framed record whose class the reader already knows
//!   (`encode_record` / `Decoder::decode`).
//! - tagged: a polymorphic slot, class name first
//!   (`encode_any` / `Decoder::decode_any`, `Decoder::decode_stream`).
//!
//! Decoding is all-or-nothing: any error aborts the call and no partially
//! filled record is returned.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::CodecConfig;
use crate::object::Object;
use crate::registry::Registry;
use crate::telemetry::CodecCounters;
use crate::types::OcdbError;
use crate::wire::{CodecError, RBuffer, WBuffer};

/// Encode a record as a single untagged frame.
pub fn encode_record(record: &dyn Object) -> Result<Vec<u8>, CodecError> {
    let mut w = WBuffer::new();
    w.write_object(record)?;
    Ok(w.into_vec())
}

/// Encode a record (or null) as a class-tagged polymorphic slot.
pub fn encode_any(record: Option<&dyn Object>) -> Result<Vec<u8>, CodecError> {
    let mut w = WBuffer::new();
    w.write_object_any(record)?;
    Ok(w.into_vec())
}

/// Decode one record with a fresh default-policy decoder.
///
/// `class_hint` names the class of an untagged frame; without it the input
/// is read as a class-tagged slot.
pub fn decode_record(
    registry: &Registry,
    data: &[u8],
    class_hint: Option<&str>,
) -> Result<Option<Box<dyn Object>>, CodecError> {
    Decoder::new(registry).decode_with_hint(data, class_hint)
}

/// Encode a sequence of records as consecutive class-tagged slots.
pub fn encode_stream<'o, I>(records: I) -> Result<Vec<u8>, CodecError>
where
    I: IntoIterator<Item = &'o dyn Object>,
{
    let mut w = WBuffer::new();
    for record in records {
        w.write_object_any(Some(record))?;
    }
    Ok(w.into_vec())
}

/// Write class-tagged records to a file, replacing its content.
pub fn write_stream_file<'o, I>(path: impl AsRef<Path>, records: I) -> Result<usize, OcdbError>
where
    I: IntoIterator<Item = &'o dyn Object>,
{
    let bytes = encode_stream(records)?;
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}

/// Decoder bound to a frozen registry and a decode policy.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r Registry,
    config: CodecConfig,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry, config: CodecConfig::default() }
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Reader over `data` carrying this decoder's registry and policy.
    pub fn reader<'a>(&self, data: &'a [u8]) -> RBuffer<'a>
    where
        'r: 'a,
    {
        RBuffer::new(data)
            .with_registry(self.registry)
            .with_config(self.config)
    }

    /// Decode one untagged record of statically known type.
    pub fn decode<T: Object + Default>(&self, data: &[u8]) -> Result<T, CodecError> {
        let mut r = self.reader(data);
        let mut record = T::default();
        r.read_object(&mut record)?;
        finish(&r)?;
        Ok(record)
    }

    /// Decode one record, untagged when `class_hint` names its class,
    /// class-tagged otherwise.
    pub fn decode_with_hint(
        &self,
        data: &[u8],
        class_hint: Option<&str>,
    ) -> Result<Option<Box<dyn Object>>, CodecError> {
        match class_hint {
            Some(class) => {
                let mut r = self.reader(data);
                let mut record = self.registry.resolve(class)?;
                r.read_object(record.as_mut())?;
                finish(&r)?;
                Ok(Some(record))
            }
            None => self.decode_any(data),
        }
    }

    /// Decode one class-tagged record (or null).
    pub fn decode_any(&self, data: &[u8]) -> Result<Option<Box<dyn Object>>, CodecError> {
        let mut r = self.reader(data);
        let record = r.read_object_any()?;
        finish(&r)?;
        Ok(record)
    }

    /// Decode consecutive class-tagged records until the input is exhausted.
    pub fn decode_stream(&self, data: &[u8]) -> Result<Vec<Option<Box<dyn Object>>>, CodecError> {
        self.decode_stream_with_counters(data).map(|(records, _)| records)
    }

    /// Same as `decode_stream`, also returning the reader's counters.
    pub fn decode_stream_with_counters(
        &self,
        data: &[u8],
    ) -> Result<(Vec<Option<Box<dyn Object>>>, CodecCounters), CodecError> {
        let mut r = self.reader(data);
        let mut records = Vec::new();
        while !r.at_end() {
            records.push(r.read_object_any()?);
        }
        debug!(records = records.len(), bytes = data.len(), "decoded object stream");
        Ok((records, r.counters()))
    }

    /// Read a whole file and decode it as a stream of class-tagged records.
    pub fn read_stream_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Option<Box<dyn Object>>>, OcdbError> {
        let data = fs::read(path)?;
        Ok(self.decode_stream(&data)?)
    }
}

fn finish(r: &RBuffer<'_>) -> Result<(), CodecError> {
    if r.at_end() {
        Ok(())
    } else {
        Err(CodecError::TrailingBytes { remaining: r.remaining() })
    }
}
