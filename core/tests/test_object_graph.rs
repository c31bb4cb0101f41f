// Whole OCDB records: round-trips through polymorphic slots, null handling,
// recovery from unknown classes, nesting limits and truncation.

#[cfg(test)]
mod tests {
    use ocdb_core::codec::{
        decode_record, encode_any, encode_record, encode_stream, write_stream_file, Decoder,
    };
    use ocdb_core::config::CodecConfig;
    use ocdb_core::containers::{ObjArray, ObjString};
    use ocdb_core::object::{Object, ObjectBase};
    use ocdb_core::ocdb::{
        build_registry, default_registry, Entry, Id, MetaData, MpExMap, Muon2DMap,
        MuonCalibParamNd, Path, RunRange,
    };
    use ocdb_core::registry::RegistryBuilder;
    use ocdb_core::types::OcdbError;
    use ocdb_core::wire::{CodecError, RBuffer, WBuffer};
    use proptest::prelude::*;

    fn pedestals() -> MuonCalibParamNd {
        let mut p = MuonCalibParamNd::new(2, 3, 0.0).unwrap();
        for ch in 0..3 {
            p.set_value(ch, 0, 100.0 + ch as f64);
            p.set_value(ch, 1, 0.5 * ch as f64);
        }
        p
    }

    fn sample_entry() -> Entry {
        let mut exmap = MpExMap::new();
        exmap.insert((100 << 32) | 1, pedestals());
        exmap.insert((100 << 32) | 2, MuonCalibParamNd::new(2, 1, -1.0).unwrap());

        let mut meta = MetaData::new("AliMUON2DMap", "shifter");
        meta.beam_period = 3;
        meta.aliroot_version = "v5-09-00".to_owned();
        meta.comment = "pedestal run".to_owned();
        meta.set_property("detector", ObjString::new("MUON"));

        let id = Id::new("MUON/Calib/Pedestals", RunRange::new(0, RunRange::INFINITY), 4, 1);
        Entry::new(id, Muon2DMap::new(exmap)).with_meta(meta)
    }

// # ✅ 1. Round-trips

    #[test]
    fn entry_roundtrips_through_tagged_slot() {
        let entry = sample_entry();
        let bytes = encode_any(Some(&entry)).unwrap();

        let back = Decoder::new(default_registry().unwrap()).decode_any(&bytes).unwrap().unwrap();
        assert_eq!(back.class(), "AliCDBEntry");
        let back = back.downcast_ref::<Entry>().unwrap();
        assert_eq!(back, &entry);

        let map = back.object_as::<Muon2DMap>().unwrap();
        let exmap = map.exmap.as_deref().unwrap();
        assert_eq!(exmap.len(), 2);
        let p = exmap.get((100 << 32) | 1).and_then(|o| o.downcast_ref::<MuonCalibParamNd>()).unwrap();
        assert_eq!(p.value(2, 0), Some(102.0));
        assert_eq!(p.value(0, 2), None);
    }

    #[test]
    fn untagged_decode_matches_hinted_decode() {
        let entry = sample_entry();
        let bytes = encode_record(&entry).unwrap();
        let decoder = Decoder::new(default_registry().unwrap());

        let typed: Entry = decoder.decode(&bytes).unwrap();
        let hinted = decoder.decode_with_hint(&bytes, Some("AliCDBEntry")).unwrap().unwrap();
        assert_eq!(&typed, hinted.downcast_ref::<Entry>().unwrap());
        assert_eq!(typed, entry);

        let via_fn = decode_record(default_registry().unwrap(), &bytes, Some("AliCDBEntry")).unwrap();
        assert_eq!(via_fn.as_deref().and_then(|o| o.downcast_ref::<Entry>()), Some(&entry));

        let tagged = encode_any(Some(&entry)).unwrap();
        let via_tag = decode_record(default_registry().unwrap(), &tagged, None).unwrap();
        assert_eq!(via_tag.as_deref().map(|o| o.class()), Some("AliCDBEntry"));
    }

    #[test]
    fn calib_param_writes_count_and_reserved_marker() {
        let p = MuonCalibParamNd::new(1, 2, 7.5).unwrap();
        let bytes = encode_record(&p).unwrap();

        // frame(6) + calib base frame(6 + TObject frame 14) + dim + size
        let n_at = 6 + 20 + 4 + 4;
        assert_eq!(&bytes[n_at..n_at + 4], &2i32.to_be_bytes());
        assert_eq!(bytes[n_at + 4], 1);
        assert_eq!(bytes.len(), n_at + 4 + 1 + 2 * 8);

        let back: MuonCalibParamNd = Decoder::new(default_registry().unwrap()).decode(&bytes).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn calib_param_reserved_byte_is_ignored_on_read() {
        let p = MuonCalibParamNd::new(1, 1, 2.0).unwrap();
        let mut bytes = encode_record(&p).unwrap();
        let marker_at = bytes.len() - 8 - 1;
        bytes[marker_at] = 0x7f;

        let back: MuonCalibParamNd = Decoder::new(default_registry().unwrap()).decode(&bytes).unwrap();
        assert_eq!(back.values, vec![2.0]);
    }

    #[test]
    fn calib_param_negative_n_is_rejected() {
        let p = MuonCalibParamNd::new(1, 1, 2.0).unwrap();
        let mut bytes = encode_record(&p).unwrap();
        let n_at = 6 + 20 + 8;
        bytes[n_at..n_at + 4].copy_from_slice(&(-3i32).to_be_bytes());

        let err = Decoder::new(default_registry().unwrap()).decode::<MuonCalibParamNd>(&bytes).unwrap_err();
        assert_eq!(err, CodecError::NegativeCount { pos: n_at, count: -3 });
    }

    #[test]
    fn calib_param_out_of_range_channel_is_rejected() {
        let mut p = MuonCalibParamNd::new(2, 1, 0.0).unwrap();
        assert_eq!(p.value(usize::MAX, 0), None);
        assert_eq!(p.value(1, 0), None);
        assert!(!p.set_value(usize::MAX, 1, 3.0));
        assert!(!p.set_value(0, 2, 3.0));
        assert!(p.set_value(0, 1, 3.0));
        assert_eq!(p.value(0, 1), Some(3.0));
    }

    #[test]
    fn calib_param_rejects_unrepresentable_shape() {
        assert!(MuonCalibParamNd::new(-1, 4, 0.0).is_none());
        assert!(MuonCalibParamNd::new(2, -4, 0.0).is_none());
        assert!(MuonCalibParamNd::new(-2, -4, 0.0).is_none());
        assert_eq!(MuonCalibParamNd::new(0, 4, 0.0).map(|p| p.values.len()), Some(0));
        assert!(MuonCalibParamNd::new(i32::MAX, 2, 0.0).is_none());
    }

    #[test]
    fn object_base_bits_survive_roundtrip() {
        let mut s = ObjString::new("flagged");
        s.base = ObjectBase::new(77);
        s.base.bits |= ocdb_core::object::ObjectBits::IS_REFERENCED;
        let back: ObjString = Decoder::new(default_registry().unwrap())
            .decode(&encode_record(&s).unwrap())
            .unwrap();
        assert_eq!(back.base, s.base);
    }

// # ✅ 2. Null slots

    #[test]
    fn null_slot_is_four_zero_bytes_and_decodes_to_none() {
        let bytes = encode_any(None).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);

        let decoder = Decoder::new(default_registry().unwrap());
        assert!(decoder.decode_any(&bytes).unwrap().is_none());
    }

    #[test]
    fn entry_with_null_payload_and_meta_roundtrips() {
        let entry = Entry { id: Id::new("A/B/C", RunRange::new(1, 1), 0, 0), ..Entry::default() };
        let bytes = encode_record(&entry).unwrap();

        let mut r = Decoder::new(default_registry().unwrap()).reader(&bytes);
        let mut back = Entry::default();
        r.read_object(&mut back).unwrap();
        assert!(r.at_end());
        assert!(back.object.is_none());
        assert!(back.meta.is_none());
        assert_eq!(r.counters().null_slots, 2);
    }

// # ❌ 3. Unknown classes

    fn registry_without_calib_params() -> ocdb_core::registry::Registry {
        let mut b = RegistryBuilder::new();
        b.register_type::<RunRange>()
            .unwrap()
            .register_type::<ObjString>()
            .unwrap()
            .register_type::<ObjArray>()
            .unwrap();
        b.build()
    }

    #[test]
    fn unknown_class_surfaces_and_stream_recovers_via_frame() {
        let bytes = encode_stream([
            &pedestals() as &dyn Object,
            &RunRange::new(3, 9) as &dyn Object,
        ])
        .unwrap();

        let registry = registry_without_calib_params();
        let mut r = Decoder::new(&registry).reader(&bytes);

        assert_eq!(
            r.read_object_any().err(),
            Some(CodecError::UnknownClass("AliMUONCalibParamND".to_owned()))
        );
        // The slot's frame is still ahead of the cursor.
        r.skip_object().unwrap();

        let next = r.read_object_as::<RunRange>().unwrap().unwrap();
        assert_eq!(*next, RunRange::new(3, 9));
        assert!(r.at_end());
    }

    #[test]
    fn unknown_nested_class_is_skipped_through_enclosing_frame() {
        let mut arr = ObjArray::new();
        arr.push(pedestals());
        let mut w = WBuffer::new();
        w.write_object_any(Some(&arr)).unwrap();
        w.write_object_any(Some(&ObjString::new("after"))).unwrap();
        let bytes = w.into_vec();

        let registry = registry_without_calib_params();
        let mut r = Decoder::new(&registry).reader(&bytes);

        assert_eq!(r.read_string().unwrap(), "TObjArray");
        let start = r.pos();
        let mut arr_back = ObjArray::new();
        assert!(matches!(r.read_object(&mut arr_back), Err(CodecError::UnknownClass(_))));

        r.seek(start).unwrap();
        let hdr = r.read_frame_header().unwrap();
        r.skip_to_frame_end(&hdr).unwrap();

        let after = r.read_object_as::<ObjString>().unwrap().unwrap();
        assert_eq!(after.as_str(), "after");
    }

    #[test]
    fn skip_unknown_policy_yields_null_and_keeps_going() {
        let mut arr = ObjArray::new();
        arr.push(pedestals());
        arr.push(RunRange::new(5, 6));
        let bytes = encode_record(&arr).unwrap();

        let registry = registry_without_calib_params();
        let config = CodecConfig::default().with_skip_unknown_classes(true);
        let mut r = Decoder::new(&registry).with_config(config).reader(&bytes);
        let mut back = ObjArray::new();
        r.read_object(&mut back).unwrap();

        assert_eq!(back.len(), 2);
        assert!(back.at(0).is_none());
        assert_eq!(back.at(1).and_then(|o| o.downcast_ref::<RunRange>()), Some(&RunRange::new(5, 6)));
        assert_eq!(r.counters().skipped_objects, 1);
    }

// # ❌ 4. Static slot types and nesting limits

    #[test]
    fn metadata_slot_with_other_class_is_rejected() {
        let mut w = WBuffer::new();
        let frame = w.begin_object(Entry::VERSION);
        w.write_object(&ObjectBase::default()).unwrap();
        w.write_object_any(None).unwrap();
        w.write_object(&Id::default()).unwrap();
        w.write_object_any(Some(&RunRange::default())).unwrap();
        w.write_bool(true);
        w.end_object(frame, "AliCDBEntry").unwrap();
        let bytes = w.into_vec();

        let err = Decoder::new(default_registry().unwrap()).decode::<Entry>(&bytes).unwrap_err();
        assert!(
            matches!(&err, CodecError::UnexpectedClass { found, .. } if found == "AliCDBRunRange"),
            "got {err:?}"
        );
    }

    fn nested_arrays(depth: usize) -> ObjArray {
        let mut arr = ObjArray::new();
        arr.push(ObjString::new("leaf"));
        for _ in 0..depth {
            let mut outer = ObjArray::new();
            outer.push(arr);
            arr = outer;
        }
        arr
    }

    #[test]
    fn nesting_deeper_than_limit_is_rejected() {
        let bytes = encode_any(Some(&nested_arrays(8))).unwrap();
        let registry = build_registry().unwrap();

        let shallow = Decoder::new(&registry).with_config(CodecConfig::default().with_max_depth(4));
        assert_eq!(shallow.decode_any(&bytes).err(), Some(CodecError::DepthExceeded { max: 4 }));

        let deep = Decoder::new(&registry).with_config(CodecConfig::default().with_max_depth(16));
        assert!(deep.decode_any(&bytes).unwrap().is_some());
    }

// # ✅ 5. Path and run range helpers

    #[test]
    fn path_levels_validity_and_wildcards() {
        let p = Path::new("MUON/Calib/Pedestals");
        assert!(p.valid);
        assert!(!p.wildcard);
        assert_eq!(p.level(1), Some("Calib"));

        assert!(!Path::new("MUON/Calib").valid);
        assert!(!Path::new("MUON//Pedestals").valid);
        assert!(!Path::new("MUON/Calib/Ped-estals").valid);

        let pattern = Path::new("MUON/*/Ped*");
        assert!(pattern.valid && pattern.wildcard);
        assert!(pattern.matches(&p));
        assert!(!pattern.matches(&Path::new("MUON/Calib/Gains")));
    }

    #[test]
    fn run_range_membership_and_overlap() {
        let r = RunRange::new(10, 20);
        assert!(r.contains(10) && r.contains(20));
        assert!(!r.contains(21));
        assert!(r.overlaps(&RunRange::new(20, RunRange::INFINITY)));
        assert!(!r.overlaps(&RunRange::new(21, 30)));
        assert!(!RunRange::new(5, 4).is_valid());
    }

    #[test]
    fn entry_display_reports_identity_and_metadata() {
        let mut out = Vec::new();
        sample_entry().display(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("=== Entry ===\nID: AliCDBId{Path: Path{Path: \"MUON/Calib/Pedestals\""));
        assert!(text.contains("Version: 0x4, SubVersion: 0x1"));
        assert!(text.contains("Owner: true\nMetaData:\nClass: \"AliMUON2DMap\"\n"));
        assert!(text.contains("  key: detector\n  val: MUON\n"));
        assert!(text.contains("Object: AliMUON2DMap\nMUON2DMap{Opt: false, Map: ExMap{"));
        assert!(text.ends_with("===\n"));
    }

// # ✅ 6. Truncation anywhere is detected, arbitrary records round-trip

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn any_truncation_is_detected(cut in 1usize..200) {
            let bytes = encode_any(Some(&sample_entry())).unwrap();
            let cut = cut.min(bytes.len() - 1);
            let short = &bytes[..bytes.len() - cut];

            let err = Decoder::new(default_registry().unwrap()).decode_any(short).unwrap_err();
            prop_assert!(err.is_truncation(), "cut {} gave {:?}", cut, err);
        }
    }

    fn text() -> impl Strategy<Value = String> {
        "\\PC{0,24}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn id_roundtrips(
            path in text(),
            first in any::<i32>(),
            last in any::<i32>(),
            version in any::<i32>(),
            sub_version in any::<i32>(),
        ) {
            let id = Id::new(&path, RunRange::new(first, last), version, sub_version);
            let bytes = encode_record(&id).unwrap();
            let back: Id = Decoder::new(default_registry().unwrap()).decode(&bytes).unwrap();
            prop_assert_eq!(back, id);
        }

        #[test]
        fn metadata_with_properties_roundtrips(
            class in text(),
            responsible in text(),
            beam_period in any::<u32>(),
            comment in text(),
            props in prop::collection::vec((text(), text()), 0..6),
        ) {
            let mut meta = MetaData::new(class, responsible);
            meta.beam_period = beam_period;
            meta.comment = comment;
            for (key, value) in &props {
                meta.set_property(key, ObjString::new(value.as_str()));
            }
            let bytes = encode_record(&meta).unwrap();
            let back: MetaData = Decoder::new(default_registry().unwrap()).decode(&bytes).unwrap();
            prop_assert_eq!(back, meta);
        }

        #[test]
        fn calib_param_roundtrips(
            dimension in any::<i32>(),
            size in any::<i32>(),
            values in prop::collection::vec(-1.0e9f64..1.0e9, 0..32),
        ) {
            let p = MuonCalibParamNd { dimension, size, values, ..Default::default() };
            let bytes = encode_record(&p).unwrap();
            let back: MuonCalibParamNd = Decoder::new(default_registry().unwrap()).decode(&bytes).unwrap();
            prop_assert_eq!(back, p);
        }
    }

    #[test]
    fn every_prefix_of_an_entry_fails() {
        let bytes = encode_record(&sample_entry()).unwrap();
        let decoder = Decoder::new(default_registry().unwrap());
        for len in 0..bytes.len() {
            let mut r = RBuffer::new(&bytes[..len]).with_registry(decoder.registry());
            let mut e = Entry::default();
            assert!(r.read_object(&mut e).is_err(), "prefix {len} decoded");
        }
    }

// # ✅ 7. File helpers

    #[test]
    fn stream_file_roundtrip_and_missing_file() {
        let path = std::env::temp_dir().join(format!("ocdb-graph-{}.bin", std::process::id()));
        let entry = sample_entry();
        let written = write_stream_file(&path, [&entry as &dyn Object, &RunRange::new(1, 2) as &dyn Object]).unwrap();
        assert_eq!(written as u64, std::fs::metadata(&path).unwrap().len());

        let records = Decoder::new(default_registry().unwrap()).read_stream_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].as_deref().and_then(|o| o.downcast_ref::<Entry>()), Some(&entry));

        let err = Decoder::new(default_registry().unwrap()).read_stream_file(&path).unwrap_err();
        assert!(matches!(err, OcdbError::Io(_)), "got {err:?}");
    }
}
