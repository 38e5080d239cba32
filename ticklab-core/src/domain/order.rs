//! Order types — strategy requests and engine-stamped orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order ID, sequential within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

/// What a strategy asks for: side, quantity, and an optional limit price.
///
/// `limit: None` is a market order. The engine stamps the request into an
/// [`Order`] with an id and submission time; strategies never mint either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: OrderSide,
    pub quantity: u64,
    pub limit: Option<f64>,
}

impl OrderRequest {
    pub fn market(side: OrderSide, quantity: u64) -> Self {
        Self {
            side,
            quantity,
            limit: None,
        }
    }

    pub fn limit(side: OrderSide, quantity: u64, price: f64) -> Self {
        Self {
            side,
            quantity,
            limit: Some(price),
        }
    }
}

/// A submitted order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: OrderSide,
    pub quantity: u64,
    pub limit: Option<f64>,
    pub submitted_at: DateTime<Utc>,
}

impl Order {
    pub fn is_market(&self) -> bool {
        self.limit.is_none()
    }
}

/// Hands out sequential order ids. One per run, owned by the engine loop.
#[derive(Debug, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn next_order_id(&mut self) -> OrderId {
        self.next += 1;
        OrderId(self.next)
    }
}
