//! Portfolio update — applies fills under the clamp policy.
//!
//! A fill that would overdraw cash or oversell stock is clamped to the
//! largest feasible quantity (possibly zero) and the shortfall is reported
//! for the trace. The run never aborts on a fill.

use crate::domain::{Fill, Order, OrderSide, Portfolio, Shortfall, ShortfallReason};

/// Apply one fill to the portfolio. Returns the shortfall record when the
/// fill had to be clamped, `None` when it applied in full.
pub fn apply_fill(portfolio: &mut Portfolio, order: &Order, fill: &Fill) -> Option<Shortfall> {
    if fill.is_reject() || fill.quantity == 0 {
        return None;
    }
    match order.side {
        OrderSide::Buy => apply_buy(portfolio, fill),
        OrderSide::Sell => apply_sell(portfolio, fill),
    }
}

/// Buy: cash down by `quantity * price + cost`, stock up, cost basis
/// reweighted. Clamped to what the cash on hand can carry.
fn apply_buy(portfolio: &mut Portfolio, fill: &Fill) -> Option<Shortfall> {
    let affordable = portfolio.max_affordable(fill.price, fill.cost);
    let applied = fill.quantity.min(affordable);
    if applied == 0 {
        // Degraded to nothing: no stock moves, and no cost either — charging
        // it could itself push cash below zero.
        return Some(shortfall(fill, 0, ShortfallReason::InsufficientCash));
    }

    let total = portfolio.stock + applied;
    portfolio.cost_basis = (portfolio.cost_basis * portfolio.stock as f64
        + fill.price * applied as f64)
        / total as f64;
    portfolio.cash -= applied as f64 * fill.price + fill.cost;
    portfolio.stock = total;
    portfolio.total_cost += fill.cost;

    (applied < fill.quantity).then(|| shortfall(fill, applied, ShortfallReason::InsufficientCash))
}

/// Sell: mirror of buy. Clamped to the stock actually held; a fill whose
/// cost would eat past the proceeds and the cash on hand degrades to zero.
fn apply_sell(portfolio: &mut Portfolio, fill: &Fill) -> Option<Shortfall> {
    let applied = fill.quantity.min(portfolio.stock);
    if applied == 0 {
        return Some(shortfall(fill, 0, ShortfallReason::InsufficientStock));
    }

    let proceeds = applied as f64 * fill.price - fill.cost;
    if portfolio.cash + proceeds < 0.0 {
        return Some(shortfall(fill, 0, ShortfallReason::InsufficientCash));
    }

    portfolio.cash += proceeds;
    portfolio.stock -= applied;
    if portfolio.stock == 0 {
        portfolio.cost_basis = 0.0;
    }
    portfolio.total_cost += fill.cost;

    (applied < fill.quantity).then(|| shortfall(fill, applied, ShortfallReason::InsufficientStock))
}

fn shortfall(fill: &Fill, applied: u64, reason: ShortfallReason) -> Shortfall {
    Shortfall {
        order_id: fill.order_id,
        requested: fill.quantity,
        applied,
        reason,
    }
}
