//! ticklab runner — run orchestration around the core engine.
//!
//! Loads tape CSVs, resolves the configured strategy, executes the replay,
//! computes performance metrics, and exports artifacts. Each run is fully
//! independent: sweeping configurations means invoking
//! [`run_single_backtest`] repeatedly with different configs, never sharing
//! mutable state between iterations.

pub mod config;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod runner;

pub use config::{BacktestConfig, ConfigError, RunId};
pub use export::{save_artifacts, ExportError};
pub use loader::{load_tape, write_tape, LoadError};
pub use metrics::{compute_metrics, PerformanceMetrics};
pub use runner::{run_single_backtest, BacktestResult, RunError, SCHEMA_VERSION};
