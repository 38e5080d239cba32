//! Artifact export — the reporting boundary.
//!
//! The core defines no file format; this module is the external reporter:
//! it writes the completed result as JSON plus per-tick CSVs for plotting.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::runner::BacktestResult;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write artifact '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot serialize result: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write csv artifact: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of `trace.csv`: the per-tick portfolio and activity summary.
#[derive(Debug, Serialize)]
struct TraceRow {
    timestamp: String,
    cash: f64,
    stock: u64,
    equity: f64,
    orders: usize,
    fills: usize,
    rejects: usize,
    shortfalls: usize,
}

/// Write `result.json`, `equity.csv`, and `trace.csv` into `output_dir`,
/// creating the directory if needed. Returns the paths written.
pub fn save_artifacts(
    result: &BacktestResult,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let json_path = output_dir.join("result.json");
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(&json_path, json).map_err(|source| ExportError::Io {
        path: json_path.clone(),
        source,
    })?;

    let equity_path = output_dir.join("equity.csv");
    write_equity_csv(result, &equity_path)?;

    let trace_path = output_dir.join("trace.csv");
    write_trace_csv(result, &trace_path)?;

    Ok(vec![json_path, equity_path, trace_path])
}

fn write_equity_csv(result: &BacktestResult, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["tick", "timestamp", "equity"])?;
    for (tick, (record, equity)) in result
        .trace
        .records()
        .iter()
        .zip(&result.equity_curve)
        .enumerate()
    {
        writer.write_record([
            tick.to_string(),
            record.timestamp.to_rfc3339(),
            equity.to_string(),
        ])?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_trace_csv(result: &BacktestResult, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in result.trace.records() {
        writer.serialize(TraceRow {
            timestamp: record.timestamp.to_rfc3339(),
            cash: record.portfolio.cash,
            stock: record.portfolio.stock,
            equity: record.portfolio.equity(record.mark),
            orders: record.orders.len(),
            fills: record.fills.iter().filter(|f| !f.is_reject()).count(),
            rejects: record.fills.iter().filter(|f| f.is_reject()).count(),
            shortfalls: record.shortfalls.len(),
        })?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
