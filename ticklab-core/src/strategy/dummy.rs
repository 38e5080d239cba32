//! Dummy strategy — observes, never trades.
//!
//! Used to validate tape replay and produce the baseline (pure observation)
//! trace the reporting layer compares trading runs against.

use super::Strategy;
use crate::domain::{MarketObservation, OrderRequest, Portfolio};

#[derive(Debug, Clone, Copy, Default)]
pub struct Dummy;

impl Strategy for Dummy {
    fn name(&self) -> &str {
        "dummy"
    }

    fn decide(
        &mut self,
        _history: &[MarketObservation],
        _portfolio: &Portfolio,
    ) -> Vec<OrderRequest> {
        Vec::new()
    }
}
