//! Tape loading — CSV rows in, validated `MarketTape` out.
//!
//! Expected columns: `timestamp` (nanoseconds since the epoch), `bid`,
//! `ask`, `bid_size`, `ask_size`, `last_price`, `last_size`. The loader
//! guarantees ascending timestamp order before handing the tape to the
//! engine; a malformed row is an error, not a skip.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use ticklab_core::domain::{MarketObservation, MarketTape, TapeError};

/// Errors from the tape loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open tape file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed tape row: {0}")]
    Csv(#[from] csv::Error),
    #[error("tape ordering violated: {0}")]
    Tape(#[from] TapeError),
}

/// One CSV row. Timestamps travel as integer nanoseconds, as in the
/// recorded feed.
#[derive(Debug, Serialize, Deserialize)]
struct RawTick {
    timestamp: i64,
    bid: f64,
    ask: f64,
    bid_size: u64,
    ask_size: u64,
    last_price: f64,
    last_size: u64,
}

/// Load a tape from a CSV file. The instrument symbol is taken from the
/// file stem, mirroring how recorded tapes are named.
pub fn load_tape(path: &Path) -> Result<MarketTape, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let symbol = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let mut reader = csv::Reader::from_reader(file);
    let mut observations = Vec::new();
    for row in reader.deserialize() {
        let raw: RawTick = row?;
        observations.push(MarketObservation {
            timestamp: DateTime::from_timestamp_nanos(raw.timestamp),
            bid: raw.bid,
            ask: raw.ask,
            bid_size: raw.bid_size,
            ask_size: raw.ask_size,
            last_price: raw.last_price,
            last_size: raw.last_size,
        });
    }

    Ok(MarketTape::new(symbol, observations)?)
}

/// Write a tape back out in the loader's CSV format. Used by the synthetic
/// tape command and by tests.
pub fn write_tape(tape: &MarketTape, path: &Path) -> Result<(), LoadError> {
    let file = std::fs::File::create(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    for obs in tape.observations() {
        writer.serialize(RawTick {
            timestamp: obs.timestamp.timestamp_nanos_opt().unwrap_or(0),
            bid: obs.bid,
            ask: obs.ask,
            bid_size: obs.bid_size,
            ask_size: obs.ask_size,
            last_price: obs.last_price,
            last_size: obs.last_size,
        })?;
    }
    writer.flush().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
