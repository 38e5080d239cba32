//! Strategy — the decision capability plugged into the engine.
//!
//! A strategy sees the visible prefix of the tape and a read-only portfolio
//! snapshot, and emits order requests. It never sees an observation later
//! than the current tick (the engine slices the prefix, so lookahead is
//! impossible by construction) and never holds a mutable portfolio.

pub mod dummy;
pub mod ewma;
pub mod factory;

use crate::domain::{MarketObservation, OrderRequest, Portfolio};
use thiserror::Error;

pub use dummy::Dummy;
pub use ewma::{BasicEwma, EwmaConfig, PricingPolicy, SizingPolicy};
pub use factory::{create_strategy, StrategyParams, StrategySpec};

/// Invalid or contradictory strategy options. Raised once at construction,
/// fatal to the run.
#[derive(Debug, Error)]
pub enum StrategyConfigError {
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("beta must be inside (0, 1), got {0}")]
    BetaOutOfRange(f64),
    #[error("margin must be a non-negative, finite fraction, got {0}")]
    InvalidMargin(f64),
    #[error("wait_time must be a non-negative, finite number of seconds, got {0}")]
    InvalidWaitTime(f64),
    #[error("fixed_quantity must be positive")]
    ZeroFixedQuantity,
    #[error("proportional_quantity must be inside (0, 1], got {0}")]
    ProportionOutOfRange(f64),
    #[error("exactly one of fixed_quantity and proportional_quantity must be set; both were given")]
    AmbiguousSizing,
    #[error(
        "exactly one of fixed_quantity and proportional_quantity must be set; neither was given"
    )]
    MissingSizing,
}

/// Trait for trading strategies.
///
/// # Contract
/// `history` is the tape prefix up to and including the current tick; the
/// last element is "now". `&mut self` carries only strategy-internal running
/// state (a smoothed average, a cooldown clock), fixed parameters live in
/// the constructor — so replaying the same tape with the same configuration
/// reproduces the same decisions exactly.
pub trait Strategy: std::fmt::Debug {
    /// Human-readable name (e.g., "basic-ewma").
    fn name(&self) -> &str;

    /// Decide what to do at the current tick. Returning an empty vector
    /// means hold.
    fn decide(
        &mut self,
        history: &[MarketObservation],
        portfolio: &Portfolio,
    ) -> Vec<OrderRequest>;
}
