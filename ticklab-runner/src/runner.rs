//! Backtest runner — wires together configuration, loading, engine, metrics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ticklab_core::domain::{Portfolio, Trace};
use ticklab_core::engine::run_backtest;
use ticklab_core::execution::{ExecutionConfigError, ExecutionModel};
use ticklab_core::strategy::{create_strategy, StrategyConfigError};

use crate::config::{BacktestConfig, ConfigError, RunId};
use crate::loader::{load_tape, LoadError};
use crate::metrics::{compute_metrics, PerformanceMetrics};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyConfigError),
    #[error("execution error: {0}")]
    Execution(#[from] ExecutionConfigError),
}

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub symbol: String,
    pub strategy: String,
    pub metrics: PerformanceMetrics,
    pub equity_curve: Vec<f64>,
    pub trace: Trace,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run a single backtest from a config: load the tape, resolve the
/// strategy, replay, and summarize. This is the entry point the CLI uses;
/// sweeps are independent invocations of it sharing no state.
pub fn run_single_backtest(config: &BacktestConfig) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let tape = load_tape(&config.data_file)?;
    let mut strategy = create_strategy(&config.strategy)?;
    let execution = ExecutionModel::new(config.latency, config.order_cost)?;
    let portfolio = Portfolio::new(config.initial_money, config.initial_stock);

    let trace = run_backtest(&tape, strategy.as_mut(), &execution, portfolio);
    let metrics = compute_metrics(&trace);

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        symbol: tape.symbol().to_string(),
        strategy: config.strategy.name.clone(),
        equity_curve: trace.equity_curve(),
        metrics,
        trace,
    })
}
