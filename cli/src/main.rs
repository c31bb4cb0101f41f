//! read-ocdb: display the records of an OCDB object stream, or write a
//! sample stream to experiment with.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ocdb_core::codec::{write_stream_file, Decoder};
use ocdb_core::config::CodecConfig;
use ocdb_core::constants::DEFAULT_MAX_DEPTH;
use ocdb_core::containers::ObjString;
use ocdb_core::object::Object;
use ocdb_core::ocdb::{
    build_registry, Entry, Id, MetaData, MpExMap, Muon2DMap, MuonCalibParamNd, RunRange,
};
use ocdb_core::telemetry::CodecSnapshot;
use ocdb_core::utils::hex_dump;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read and write OCDB object streams")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a file of class-tagged objects and display every record.
    Read {
        file: PathBuf,
        /// Skip objects whose class is not registered instead of failing.
        #[arg(long)]
        skip_unknown: bool,
        /// Accept frames written by newer schema versions.
        #[arg(long)]
        allow_newer: bool,
        /// Maximum nesting depth of polymorphic objects.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        /// Print decode counters as JSON.
        #[arg(long)]
        stats: bool,
        /// Print a hex dump of the raw input.
        #[arg(long)]
        dump: bool,
    },
    /// Write a sample entry holding MUON pedestals.
    Sample { file: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Read { file, skip_unknown, allow_newer, max_depth, stats, dump } => {
            let config = read_config(skip_unknown, allow_newer, max_depth);
            read(&file, config, stats, dump)
        }
        Command::Sample { file } => sample(&file),
    }
}

/// `RUST_LOG`-style directives, or INFO when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn read_config(skip_unknown: bool, allow_newer: bool, max_depth: usize) -> CodecConfig {
    let config = if skip_unknown && allow_newer {
        CodecConfig::lenient()
    } else {
        CodecConfig::default()
            .with_skip_unknown_classes(skip_unknown)
            .with_allow_newer_versions(allow_newer)
    };
    config.with_max_depth(max_depth)
}

fn read(file: &Path, config: CodecConfig, stats: bool, dump: bool) -> Result<()> {
    let data = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;
    info!(file = %file.display(), bytes = data.len(), "decoding object stream");

    let registry = build_registry().context("build class registry")?;
    let decoder = Decoder::new(&registry).with_config(config);

    let timer = Instant::now();
    let (records, counters) = decoder
        .decode_stream_with_counters(&data)
        .with_context(|| format!("decode {}", file.display()))?;
    let elapsed = timer.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, record) in records.iter().enumerate() {
        match record.as_deref() {
            None => warn!(index = i, "null or skipped object"),
            Some(obj) => {
                info!(index = i, class = obj.class(), "object");
                display(&mut out, obj)?;
            }
        }
    }

    if dump {
        write!(out, "{}", hex_dump(&data))?;
    }
    if stats {
        let snapshot = CodecSnapshot::from(&counters, elapsed);
        writeln!(out, "{}", snapshot.to_json().context("serialize decode counters")?)?;
    }
    Ok(())
}

fn display(out: &mut impl Write, obj: &dyn Object) -> io::Result<()> {
    match obj.downcast_ref::<Entry>() {
        Some(entry) => entry.display(out),
        None => writeln!(out, "{}: {:?}", obj.class(), obj),
    }
}

fn sample(file: &Path) -> Result<()> {
    let mut exmap = MpExMap::new();
    for (de, manu) in [(100i64, 1i64), (100, 2), (101, 1)] {
        let mut pedestals =
            MuonCalibParamNd::new(2, 4, 0.0).context("allocate pedestal parameters")?;
        for ch in 0..4 {
            pedestals.set_value(ch, 0, 100.0 + ch as f64);
            pedestals.set_value(ch, 1, 1.5);
        }
        exmap.insert((de << 32) | manu, pedestals);
    }

    let mut meta = MetaData::new("AliMUON2DMap", "read-ocdb");
    meta.beam_period = 1;
    meta.aliroot_version = "v5-09-00".to_owned();
    meta.comment = "sample pedestals".to_owned();
    meta.set_property("detector", ObjString::new("MUON"));
    meta.set_property("kind", ObjString::new("pedestals"));

    let id = Id::new("MUON/Calib/Pedestals", RunRange::new(0, RunRange::INFINITY), 1, 0);
    let entry = Entry::new(id, Muon2DMap::new(exmap)).with_meta(meta);

    let written = write_stream_file(file, [&entry as &dyn Object])
        .with_context(|| format!("write {}", file.display()))?;
    info!(file = %file.display(), bytes = written, "sample stream written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn rust_log_can_lower_verbosity() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn missing_rust_log_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn both_relaxing_flags_give_the_lenient_reader() {
        assert_eq!(read_config(true, true, DEFAULT_MAX_DEPTH), CodecConfig::lenient());

        let strict = read_config(false, false, 4);
        assert!(!strict.skip_unknown_classes && !strict.allow_newer_versions);
        assert_eq!(strict.max_depth, 4);

        let one = read_config(true, false, DEFAULT_MAX_DEPTH);
        assert!(one.skip_unknown_classes && !one.allow_newer_versions);
    }
}
