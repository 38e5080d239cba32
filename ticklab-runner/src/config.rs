//! Serializable backtest configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use ticklab_core::strategy::StrategySpec;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("initial_money must be a non-negative, finite amount, got {0}")]
    InvalidInitialMoney(f64),
}

/// Configuration for a single backtest run.
///
/// Captures everything needed to reproduce the run: the tape file, the
/// strategy and its option bag, and the execution/portfolio parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Path to the historical tape CSV.
    pub data_file: PathBuf,

    /// Strategy selection plus its option bag.
    pub strategy: StrategySpec,

    /// Delay between order submission and resolution, in seconds.
    #[serde(default)]
    pub latency: f64,

    /// Flat cost charged per executed order.
    #[serde(default)]
    pub order_cost: f64,

    /// Starting cash.
    #[serde(default = "default_initial_money")]
    pub initial_money: f64,

    /// Starting stock quantity.
    #[serde(default)]
    pub initial_stock: u64,
}

fn default_initial_money() -> f64 {
    10_000.0
}

impl BacktestConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parameter checks the type system cannot express. Strategy and
    /// execution parameters are validated by their own constructors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_money.is_finite() || self.initial_money < 0.0 {
            return Err(ConfigError::InvalidInitialMoney(self.initial_money));
        }
        Ok(())
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which is what makes
    /// determinism checkable across invocations.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        hash.to_hex().to_string()
    }
}
