//! BasicEwma — mean-reversion around an exponentially-weighted mid price.
//!
//! Keeps a running EWMA of the mid price. When the average sits above the
//! live mid by more than `margin`, the price has dipped and the strategy
//! buys; the mirror case sells. A cooldown throttles order emission, and a
//! sizing policy converts conviction into quantity.

use super::{Strategy, StrategyConfigError};
use crate::domain::{MarketObservation, OrderRequest, OrderSide, Portfolio};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How to price emitted orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingPolicy {
    /// Cross the spread: buy at the ask, sell at the bid.
    Aggressive,
    /// Post at the EWMA value and wait to be reached.
    Passive,
}

/// How to size emitted orders. Exactly one policy is active per
/// configuration — the tagged union makes the both-or-neither misconfiguration
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizingPolicy {
    /// Always this many units.
    Fixed(u64),
    /// This fraction of available cash (buys) or stock (sells), floored.
    Proportional(f64),
}

/// Construction parameters for [`BasicEwma`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EwmaConfig {
    /// Smoothing factor: weight retained by the previous average.
    pub beta: f64,
    /// Fractional band around the mid that the average must leave before
    /// the strategy acts.
    pub margin: f64,
    /// Cooldown after emitting an order, in seconds.
    pub wait_time: f64,
    pub pricing: PricingPolicy,
    pub sizing: SizingPolicy,
}

#[derive(Debug)]
pub struct BasicEwma {
    beta: f64,
    margin: f64,
    wait_time: TimeDelta,
    pricing: PricingPolicy,
    sizing: SizingPolicy,
    ewma: Option<f64>,
    last_order_at: Option<DateTime<Utc>>,
}

impl BasicEwma {
    pub fn new(config: EwmaConfig) -> Result<Self, StrategyConfigError> {
        if !config.beta.is_finite() || config.beta <= 0.0 || config.beta >= 1.0 {
            return Err(StrategyConfigError::BetaOutOfRange(config.beta));
        }
        if !config.margin.is_finite() || config.margin < 0.0 {
            return Err(StrategyConfigError::InvalidMargin(config.margin));
        }
        if !config.wait_time.is_finite() || config.wait_time < 0.0 {
            return Err(StrategyConfigError::InvalidWaitTime(config.wait_time));
        }
        match config.sizing {
            SizingPolicy::Fixed(0) => return Err(StrategyConfigError::ZeroFixedQuantity),
            SizingPolicy::Proportional(fraction)
                if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 =>
            {
                return Err(StrategyConfigError::ProportionOutOfRange(fraction));
            }
            _ => {}
        }
        let wait_time = std::time::Duration::try_from_secs_f64(config.wait_time)
            .ok()
            .and_then(|d| TimeDelta::from_std(d).ok())
            .ok_or(StrategyConfigError::InvalidWaitTime(config.wait_time))?;
        Ok(Self {
            beta: config.beta,
            margin: config.margin,
            wait_time,
            pricing: config.pricing,
            sizing: config.sizing,
            ewma: None,
            last_order_at: None,
        })
    }

    /// Current value of the running average, `None` before the first tick.
    pub fn ewma(&self) -> Option<f64> {
        self.ewma
    }

    fn buy_request(&self, obs: &MarketObservation, ewma: f64, portfolio: &Portfolio) -> Option<OrderRequest> {
        let price = match self.pricing {
            PricingPolicy::Aggressive => obs.ask,
            PricingPolicy::Passive => ewma,
        };
        if price <= 0.0 || portfolio.cash < price {
            return None;
        }
        let quantity = match self.sizing {
            SizingPolicy::Fixed(n) => n,
            SizingPolicy::Proportional(fraction) => {
                (fraction * portfolio.cash / price).floor() as u64
            }
        };
        // Never ask for more than the cash on hand can carry.
        let quantity = quantity.min((portfolio.cash / price).floor() as u64);
        (quantity > 0).then(|| OrderRequest::limit(OrderSide::Buy, quantity, price))
    }

    fn sell_request(&self, obs: &MarketObservation, ewma: f64, portfolio: &Portfolio) -> Option<OrderRequest> {
        if portfolio.stock == 0 {
            return None;
        }
        let price = match self.pricing {
            PricingPolicy::Aggressive => obs.bid,
            PricingPolicy::Passive => ewma,
        };
        if price <= 0.0 {
            return None;
        }
        let quantity = match self.sizing {
            SizingPolicy::Fixed(n) => n,
            SizingPolicy::Proportional(fraction) => {
                (fraction * portfolio.stock as f64).floor() as u64
            }
        };
        let quantity = quantity.min(portfolio.stock);
        (quantity > 0).then(|| OrderRequest::limit(OrderSide::Sell, quantity, price))
    }
}

impl Strategy for BasicEwma {
    fn name(&self) -> &str {
        "basic-ewma"
    }

    fn decide(
        &mut self,
        history: &[MarketObservation],
        portfolio: &Portfolio,
    ) -> Vec<OrderRequest> {
        let Some(obs) = history.last() else {
            return Vec::new();
        };
        if !obs.has_both_sides() {
            return Vec::new();
        }
        if let Some(last) = self.last_order_at {
            if obs.timestamp < last + self.wait_time {
                return Vec::new();
            }
        }

        let mid = obs.mid_price();
        let ewma = match self.ewma {
            // Seeding tick: there is no prior average to compare against.
            None => {
                self.ewma = Some(mid);
                return Vec::new();
            }
            Some(previous) => {
                let updated = self.beta * previous + (1.0 - self.beta) * mid;
                self.ewma = Some(updated);
                updated
            }
        };

        let request = if ewma > mid * (1.0 + self.margin) {
            self.buy_request(obs, ewma, portfolio)
        } else if ewma < mid * (1.0 - self.margin) {
            self.sell_request(obs, ewma, portfolio)
        } else {
            None
        };

        match request {
            Some(request) => {
                self.last_order_at = Some(obs.timestamp);
                vec![request]
            }
            None => Vec::new(),
        }
    }
}
