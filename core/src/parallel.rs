//! parallel.rs
//!
//! Concurrent decode of independent object streams.
//!
//! Design notes:
//! - One stream is always decoded by a single worker; parallelism is across
//!   streams only.
//! - Workers share the decoder (and its frozen registry) by reference inside
//!   a `thread::scope`, so no `Arc` or locking is needed.
//! - Results come back over a channel out of order and are placed by index.

use std::thread;

use crossbeam::channel::{bounded, unbounded};
use tracing::{debug, trace};

use crate::codec::Decoder;
use crate::object::Object;
use crate::telemetry::CodecCounters;
use crate::wire::CodecError;

pub type StreamResult = Result<Vec<Option<Box<dyn Object>>>, CodecError>;

/// Outcome of `decode_batch`: one result per input stream, in input order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<StreamResult>,
    /// Counters merged over every stream that decoded successfully.
    pub counters: CodecCounters,
}

impl BatchOutcome {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.is_err()).count()
    }
}

/// Workers used when the caller does not choose: every core but one.
pub fn default_workers() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Decode each input as a stream of class-tagged objects on `workers` threads.
///
/// A failing stream does not affect the others.
pub fn decode_batch(decoder: &Decoder<'_>, inputs: &[&[u8]], workers: usize) -> BatchOutcome {
    let workers = workers.max(1).min(inputs.len().max(1));
    debug!(streams = inputs.len(), workers, "starting batch decode");

    let mut results: Vec<StreamResult> = (0..inputs.len()).map(|_| Ok(Vec::new())).collect();
    let mut counters = CodecCounters::default();

    let (job_tx, job_rx) = bounded::<(usize, &[u8])>(workers * 2);
    let (out_tx, out_rx) = unbounded::<(usize, Result<(Vec<Option<Box<dyn Object>>>, CodecCounters), CodecError>)>();

    thread::scope(|scope| {
        for i in 0..workers {
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            scope.spawn(move || {
                for (index, data) in rx.iter() {
                    trace!(worker = i, stream = index, bytes = data.len(), "decoding stream");
                    if tx.send((index, decoder.decode_stream_with_counters(data))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(out_tx);

        scope.spawn(move || {
            for job in inputs.iter().copied().enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        for (index, res) in out_rx.iter() {
            results[index] = res.map(|(objects, c)| {
                counters.merge(&c);
                objects
            });
        }
    });

    let outcome = BatchOutcome { results, counters };
    debug!(streams = inputs.len(), failures = outcome.failures(), "batch decode finished");
    outcome
}
