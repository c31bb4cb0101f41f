// Frame header writing and verification:
//
// * byte count equals the bytes physically written
// * mismatching counts are rejected
// * newer schema versions are refused or skipped depending on policy
// * whole objects can be skipped through their frame

#[cfg(test)]
mod tests {
    use byteorder::{BigEndian, ByteOrder};
    use ocdb_core::codec::{encode_record, Decoder};
    use ocdb_core::config::CodecConfig;
    use ocdb_core::constants::FRAME_HEADER_LEN;
    use ocdb_core::object::Object;
    use ocdb_core::ocdb::{Id, RunRange};
    use ocdb_core::registry::Registry;
    use ocdb_core::wire::{CodecError, RBuffer, WBuffer};

    /// Version 1 reader: a counter.
    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        value: u32,
    }

    impl Object for Counter {
        fn class(&self) -> &'static str {
            "Counter"
        }

        fn version(&self) -> u16 {
            1
        }

        fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
            let frame = w.begin_object(self.version());
            w.write_u32(self.value);
            w.end_object(frame, self.class())
        }

        fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
            let hdr = r.read_version(self.class(), 1)?;
            self.value = r.read_u32()?;
            r.check_frame(&hdr, self.class())
        }
    }

    /// Version 2 writer: same class with a trailing label.
    #[derive(Debug, Clone, PartialEq, Default)]
    struct CounterV2 {
        value: u32,
        label: String,
    }

    impl Object for CounterV2 {
        fn class(&self) -> &'static str {
            "Counter"
        }

        fn version(&self) -> u16 {
            2
        }

        fn marshal(&self, w: &mut WBuffer) -> Result<usize, CodecError> {
            let frame = w.begin_object(self.version());
            w.write_u32(self.value);
            w.write_string(&self.label)?;
            w.end_object(frame, self.class())
        }

        fn unmarshal(&mut self, r: &mut RBuffer<'_>) -> Result<(), CodecError> {
            let hdr = r.read_version(self.class(), 2)?;
            self.value = r.read_u32()?;
            self.label = r.read_string()?;
            r.check_frame(&hdr, self.class())
        }
    }

// # ✅ 1. Byte count matches the written payload

    #[test]
    fn byte_count_covers_payload_after_count_field() {
        let bytes = encode_record(&Counter { value: 7 }).unwrap();
        assert_eq!(bytes.len(), FRAME_HEADER_LEN + 4);
        assert_eq!(BigEndian::read_u16(&bytes[0..2]), 1);
        assert_eq!(BigEndian::read_u32(&bytes[2..6]) as usize, bytes.len() - FRAME_HEADER_LEN);
    }

    #[test]
    fn nested_frames_are_counted_by_their_parent() {
        let id = Id::new("MUON/Calib/Gains", RunRange::new(1, 10), 2, 0);
        let bytes = encode_record(&id).unwrap();

        let declared = BigEndian::read_u32(&bytes[2..6]) as usize;
        assert_eq!(declared, bytes.len() - FRAME_HEADER_LEN);

        let mut r = RBuffer::new(&bytes);
        let hdr = r.read_frame_header().unwrap();
        assert_eq!(hdr.end(), bytes.len());
    }

    #[test]
    fn end_object_returns_total_size() {
        let mut w = WBuffer::new();
        w.write_u8(0xee);
        let n = w.write_object(&Counter { value: 1 }).unwrap();
        assert_eq!(n, FRAME_HEADER_LEN + 4);
        assert_eq!(w.pos(), 1 + n);
        assert_eq!(w.counters().frames_written, 1);
    }

// # ❌ 2. Mismatching counts

    #[test]
    fn declared_count_larger_than_payload_is_rejected() {
        let mut bytes = encode_record(&Counter { value: 3 }).unwrap();
        BigEndian::write_u32(&mut bytes[2..6], 5);
        bytes.push(0);

        let registry = Registry::empty();
        let err = Decoder::new(&registry).decode::<Counter>(&bytes).unwrap_err();
        assert_eq!(
            err,
            CodecError::FrameMismatch { class: "Counter".to_owned(), declared: 5, actual: 4 }
        );
    }

    #[test]
    fn declared_count_smaller_than_payload_is_rejected() {
        let mut bytes = encode_record(&Counter { value: 3 }).unwrap();
        BigEndian::write_u32(&mut bytes[2..6], 2);

        let registry = Registry::empty();
        let err = Decoder::new(&registry).decode::<Counter>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::FrameMismatch { declared: 2, actual: 4, .. }));
    }

    #[test]
    fn count_past_end_of_input_is_truncation() {
        let mut bytes = encode_record(&Counter { value: 3 }).unwrap();
        BigEndian::write_u32(&mut bytes[2..6], 100);

        let mut r = RBuffer::new(&bytes);
        let err = r.read_frame_header().unwrap_err();
        assert!(matches!(err, CodecError::TruncatedStream { need: 100, have: 4, .. }));
    }

// # ✅ 3. Schema skew

    #[test]
    fn newer_version_is_refused_by_default() {
        let bytes = encode_record(&CounterV2 { value: 9, label: "new".to_owned() }).unwrap();

        let registry = Registry::empty();
        let err = Decoder::new(&registry).decode::<Counter>(&bytes).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedVersion { class: "Counter".to_owned(), version: 2, supported: 1 }
        );
    }

    #[test]
    fn newer_version_trailing_fields_are_skipped_when_allowed() {
        let bytes = encode_record(&CounterV2 { value: 9, label: "new".to_owned() }).unwrap();

        let registry = Registry::empty();
        let config = CodecConfig::default().with_allow_newer_versions(true);
        let mut r = Decoder::new(&registry).with_config(config).reader(&bytes);

        let mut counter = Counter::default();
        r.read_object(&mut counter).unwrap();
        assert_eq!(counter.value, 9);
        assert!(r.at_end());
        assert_eq!(r.counters().skipped_bytes, 4 + 3);
    }

    #[test]
    fn header_reports_accepted_newer_version() {
        let bytes = encode_record(&CounterV2 { value: 9, label: "new".to_owned() }).unwrap();
        let registry = Registry::empty();

        let mut lenient = Decoder::new(&registry).with_config(CodecConfig::lenient()).reader(&bytes);
        let hdr = lenient.read_version("Counter", 1).unwrap();
        assert!(hdr.is_newer());
        assert_eq!(lenient.read_u32().unwrap(), 9);
        lenient.check_frame(&hdr, "Counter").unwrap();
        assert!(lenient.at_end());

        let mut current = Decoder::new(&registry).reader(&bytes);
        let hdr = current.read_version("Counter", 2).unwrap();
        assert!(!hdr.is_newer());
    }

    #[test]
    fn newer_reader_on_older_layout_fails_as_truncation() {
        let bytes = encode_record(&Counter { value: 4 }).unwrap();
        let registry = Registry::empty();
        // v2 reader expects a label the v1 writer never wrote.
        let err = Decoder::new(&registry).decode::<CounterV2>(&bytes).unwrap_err();
        assert!(err.is_truncation(), "got {err:?}");
    }

// # ✅ 4. Skipping whole objects

    #[test]
    fn skip_object_lands_on_next_object() {
        let mut w = WBuffer::new();
        w.write_object(&CounterV2 { value: 1, label: "skip me".to_owned() }).unwrap();
        w.write_object(&Counter { value: 2 }).unwrap();
        let bytes = w.into_vec();

        let mut r = RBuffer::new(&bytes);
        let skipped = r.skip_object().unwrap();
        assert_eq!(skipped.version, 2);

        let mut counter = Counter::default();
        r.read_object(&mut counter).unwrap();
        assert_eq!(counter.value, 2);
        assert!(r.at_end());

        let c = r.counters();
        assert_eq!(c.skipped_objects, 1);
        assert_eq!(c.frames_read, 2);
    }
}
