// Batch decode of independent streams on a worker pool.

#[cfg(test)]
mod tests {
    use ocdb_core::codec::{encode_stream, Decoder};
    use ocdb_core::containers::ObjString;
    use ocdb_core::object::Object;
    use ocdb_core::ocdb::{default_registry, RunRange};
    use ocdb_core::parallel::{decode_batch, default_workers};
    use ocdb_core::wire::CodecError;

    fn stream(i: i32) -> Vec<u8> {
        let label = ObjString::new(format!("stream-{i}"));
        let runs = RunRange::new(i, i + 10);
        encode_stream([&label as &dyn Object, &runs as &dyn Object]).unwrap()
    }

    #[test]
    fn results_come_back_in_input_order() {
        let streams: Vec<Vec<u8>> = (0..32).map(stream).collect();
        let inputs: Vec<&[u8]> = streams.iter().map(Vec::as_slice).collect();

        let decoder = Decoder::new(default_registry().unwrap());
        let outcome = decode_batch(&decoder, &inputs, 4);

        assert_eq!(outcome.results.len(), 32);
        assert_eq!(outcome.failures(), 0);
        for (i, res) in outcome.results.iter().enumerate() {
            let objs = res.as_ref().unwrap();
            assert_eq!(objs.len(), 2);
            let label = objs[0].as_deref().and_then(|o| o.downcast_ref::<ObjString>()).unwrap();
            assert_eq!(label.as_str(), format!("stream-{i}"));
            let runs = objs[1].as_deref().and_then(|o| o.downcast_ref::<RunRange>()).unwrap();
            assert_eq!(runs.first, i as i32);
        }
        assert_eq!(outcome.counters.objects_decoded, 32 * 4);
    }

    #[test]
    fn one_bad_stream_does_not_affect_the_others() {
        let good = stream(1);
        let bad = &good[..good.len() - 1];
        let inputs: Vec<&[u8]> = vec![good.as_slice(), bad, good.as_slice()];

        let decoder = Decoder::new(default_registry().unwrap());
        let outcome = decode_batch(&decoder, &inputs, 2);

        assert_eq!(outcome.failures(), 1);
        assert!(outcome.results[0].is_ok());
        assert!(matches!(outcome.results[1], Err(CodecError::TruncatedStream { .. })));
        assert!(outcome.results[2].is_ok());
    }

    #[test]
    fn single_worker_and_empty_batch() {
        let decoder = Decoder::new(default_registry().unwrap());
        assert!(decode_batch(&decoder, &[], 8).results.is_empty());

        let s = stream(3);
        let outcome = decode_batch(&decoder, &[s.as_slice()], 0);
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].is_ok());
    }

    #[test]
    fn default_workers_is_at_least_one() {
        assert!(default_workers() >= 1);
    }
}
