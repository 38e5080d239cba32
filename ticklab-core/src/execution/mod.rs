//! Execution model — turns submitted orders into fills against the tape.
//!
//! Resolution order per order: latency delay → touch price → limit check →
//! liquidity cap → flat cost. One resolution attempt per order, no
//! time-in-force; a rejected order is never retried by the engine.

use crate::domain::{Fill, MarketObservation, MarketTape, Order, OrderSide, RejectReason};
use chrono::TimeDelta;
use thiserror::Error;

/// Invalid execution parameters, fatal at construction.
#[derive(Debug, Error)]
pub enum ExecutionConfigError {
    #[error("latency must be a non-negative, finite number of seconds, got {0}")]
    InvalidLatency(f64),
    #[error("order cost must be a non-negative, finite amount, got {0}")]
    InvalidOrderCost(f64),
}

/// Latency and per-order cost assumptions for a run.
///
/// The model is stateless: `execute` only reads the tape, so the same order
/// against the same tape always resolves identically.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionModel {
    latency: TimeDelta,
    order_cost: f64,
}

impl ExecutionModel {
    pub fn new(latency_secs: f64, order_cost: f64) -> Result<Self, ExecutionConfigError> {
        if !latency_secs.is_finite() || latency_secs < 0.0 {
            return Err(ExecutionConfigError::InvalidLatency(latency_secs));
        }
        if !order_cost.is_finite() || order_cost < 0.0 {
            return Err(ExecutionConfigError::InvalidOrderCost(order_cost));
        }
        let latency = std::time::Duration::try_from_secs_f64(latency_secs)
            .ok()
            .and_then(|d| TimeDelta::from_std(d).ok())
            .ok_or(ExecutionConfigError::InvalidLatency(latency_secs))?;
        Ok(Self { latency, order_cost })
    }

    /// Zero latency, zero cost.
    pub fn frictionless() -> Self {
        Self {
            latency: TimeDelta::zero(),
            order_cost: 0.0,
        }
    }

    pub fn latency(&self) -> TimeDelta {
        self.latency
    }

    pub fn order_cost(&self) -> f64 {
        self.order_cost
    }

    /// Resolve an order against the tape.
    ///
    /// The fill is evaluated at the earliest observation at or after
    /// `submitted_at + latency` (earliest wins a timestamp tie). No such
    /// observation rejects the order; that reject is stamped at the
    /// unreachable resolution target.
    pub fn execute(&self, order: &Order, tape: &MarketTape) -> Fill {
        let target = order.submitted_at + self.latency;
        let Some((_, obs)) = tape.resolve_at(target) else {
            return Fill::rejected(order.id, target, RejectReason::LatencyHorizon);
        };

        let (touch, available) = opposite_touch(order.side, obs);
        if available == 0 || touch <= 0.0 || !touch.is_finite() {
            return Fill::rejected(order.id, obs.timestamp, RejectReason::NoLiquidity);
        }

        if let Some(limit) = order.limit {
            // A limit equal to the touch is satisfied: fills happen at the
            // touch, which is then "limit or better".
            let satisfied = match order.side {
                OrderSide::Buy => touch <= limit,
                OrderSide::Sell => touch >= limit,
            };
            if !satisfied {
                return Fill::rejected(order.id, obs.timestamp, RejectReason::LimitNotSatisfied);
            }
        }

        let quantity = order.quantity.min(available);
        Fill::executed(order.id, quantity, touch, obs.timestamp, self.order_cost)
    }
}

/// Best opposite-side price and size: buyers lift the ask, sellers hit the bid.
fn opposite_touch(side: OrderSide, obs: &MarketObservation) -> (f64, u64) {
    match side {
        OrderSide::Buy => (obs.ask, obs.ask_size),
        OrderSide::Sell => (obs.bid, obs.bid_size),
    }
}
