//! Fill — the realized outcome of attempting to execute an order.

use super::order::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why an order was rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The resolution time fell beyond the end of the tape.
    LatencyHorizon,
    /// The touch price did not satisfy the order's limit.
    LimitNotSatisfied,
    /// The opposite side of the book was empty at the resolution time.
    NoLiquidity,
}

/// Fill record. `quantity == 0` denotes a full reject, in which case
/// `reject` carries the reason and no cost is charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub order_id: OrderId,
    pub quantity: u64,
    pub price: f64,
    pub filled_at: DateTime<Utc>,
    pub cost: f64,
    pub reject: Option<RejectReason>,
}

impl Fill {
    pub fn executed(
        order_id: OrderId,
        quantity: u64,
        price: f64,
        filled_at: DateTime<Utc>,
        cost: f64,
    ) -> Self {
        Self {
            order_id,
            quantity,
            price,
            filled_at,
            cost,
            reject: None,
        }
    }

    pub fn rejected(order_id: OrderId, at: DateTime<Utc>, reason: RejectReason) -> Self {
        Self {
            order_id,
            quantity: 0,
            price: 0.0,
            filled_at: at,
            cost: 0.0,
            reject: Some(reason),
        }
    }

    pub fn is_reject(&self) -> bool {
        self.reject.is_some()
    }

    /// Notional value of the fill, before cost.
    pub fn gross(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn executed_fill_carries_no_reason() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let fill = Fill::executed(OrderId(1), 20, 99.0, at, 2.5);
        assert!(!fill.is_reject());
        assert_eq!(fill.gross(), 1980.0);
    }

    #[test]
    fn rejected_fill_is_zero_quantity_zero_cost() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let fill = Fill::rejected(OrderId(1), at, RejectReason::LatencyHorizon);
        assert!(fill.is_reject());
        assert_eq!(fill.quantity, 0);
        assert_eq!(fill.cost, 0.0);
    }
}
