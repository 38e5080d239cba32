//! Trace — the append-only record of a run, one entry per tick.

use super::fill::Fill;
use super::order::{Order, OrderId};
use super::portfolio::Portfolio;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which portfolio invariant forced a fill to be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortfallReason {
    InsufficientCash,
    InsufficientStock,
}

/// Record of the partial-failure policy firing: the execution model filled
/// `requested`, the portfolio could only absorb `applied`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub order_id: OrderId,
    pub requested: u64,
    pub applied: u64,
    pub reason: ShortfallReason,
}

/// Everything that happened on one tick, snapshotted after fills applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub timestamp: DateTime<Utc>,
    pub portfolio: Portfolio,
    pub orders: Vec<Order>,
    pub fills: Vec<Fill>,
    pub shortfalls: Vec<Shortfall>,
    /// Mark price used for equity at this tick: the mid when both sides of
    /// the book are present, the last trade price otherwise.
    pub mark: f64,
}

/// Ordered, write-once run record. Appended to only by the engine; read by
/// the reporting layer after the run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    symbol: String,
    records: Vec<TickRecord>,
}

impl Trace {
    pub(crate) fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            records: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: TickRecord) {
        self.records.push(record);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Portfolio state after the final tick, `None` for an empty tape.
    pub fn final_portfolio(&self) -> Option<&Portfolio> {
        self.records.last().map(|record| &record.portfolio)
    }

    /// Equity at each tick, marked at that tick's mark price.
    pub fn equity_curve(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| record.portfolio.equity(record.mark))
            .collect()
    }

    pub fn orders_submitted(&self) -> usize {
        self.records.iter().map(|record| record.orders.len()).sum()
    }

    pub fn fills_executed(&self) -> usize {
        self.records
            .iter()
            .flat_map(|record| &record.fills)
            .filter(|fill| !fill.is_reject())
            .count()
    }

    pub fn rejects(&self) -> usize {
        self.records
            .iter()
            .flat_map(|record| &record.fills)
            .filter(|fill| fill.is_reject())
            .count()
    }

    pub fn shortfalls(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.shortfalls.len())
            .sum()
    }
}
