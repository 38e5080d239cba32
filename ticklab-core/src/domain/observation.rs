//! MarketObservation — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped quote/trade snapshot for a single instrument.
///
/// `bid_size`/`ask_size` are the quantities resting at the touch and double
/// as the available-size figure the execution model caps fills at. A size of
/// zero means that side of the book is empty (the matching price field is
/// then meaningless and should not be read).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    pub timestamp: DateTime<Utc>,
    pub bid: f64,
    pub ask: f64,
    pub bid_size: u64,
    pub ask_size: u64,
    pub last_price: f64,
    pub last_size: u64,
}

impl MarketObservation {
    /// Midpoint of the touch. Only meaningful when both sides are present.
    pub fn mid_price(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Whether both sides of the book carry quantity.
    pub fn has_both_sides(&self) -> bool {
        self.bid_size > 0 && self.ask_size > 0
    }

    /// Returns true if any price field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !self.bid.is_finite() || !self.ask.is_finite() || !self.last_price.is_finite()
    }

    /// Basic quote sanity: finite prices, positive where the side has size,
    /// and the bid not above the ask when both sides are present.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        if self.bid_size > 0 && self.bid <= 0.0 {
            return false;
        }
        if self.ask_size > 0 && self.ask <= 0.0 {
            return false;
        }
        if self.has_both_sides() && self.bid > self.ask {
            return false;
        }
        true
    }
}
