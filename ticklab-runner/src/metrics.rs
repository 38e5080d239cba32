//! Performance metrics computed from a completed trace.

use serde::{Deserialize, Serialize};
use ticklab_core::domain::Trace;

/// Summary statistics for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Equity at the first tick, marked at that tick's mark price.
    pub initial_equity: f64,
    /// Equity at the final tick.
    pub final_equity: f64,
    /// Total return over the run, percent.
    pub total_return_pct: f64,
    /// Worst peak-to-trough equity decline, percent.
    pub max_drawdown_pct: f64,
    pub tick_count: usize,
    pub orders_submitted: usize,
    pub orders_filled: usize,
    pub orders_rejected: usize,
    pub shortfalls: usize,
    /// Sum of per-order costs actually charged.
    pub total_cost_paid: f64,
}

/// Compute metrics from a trace. An empty trace yields all-zero metrics.
pub fn compute_metrics(trace: &Trace) -> PerformanceMetrics {
    let equity_curve = trace.equity_curve();
    let initial_equity = equity_curve.first().copied().unwrap_or(0.0);
    let final_equity = equity_curve.last().copied().unwrap_or(0.0);

    let total_return_pct = if initial_equity > 0.0 {
        (final_equity / initial_equity - 1.0) * 100.0
    } else {
        0.0
    };

    PerformanceMetrics {
        initial_equity,
        final_equity,
        total_return_pct,
        max_drawdown_pct: max_drawdown_pct(&equity_curve),
        tick_count: trace.len(),
        orders_submitted: trace.orders_submitted(),
        orders_filled: trace.fills_executed(),
        orders_rejected: trace.rejects(),
        shortfalls: trace.shortfalls(),
        total_cost_paid: trace
            .final_portfolio()
            .map(|portfolio| portfolio.total_cost)
            .unwrap_or(0.0),
    }
}

/// Worst peak-to-trough decline of the equity curve, in percent.
fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            let drawdown = (peak - equity) / peak * 100.0;
            if drawdown > worst {
                worst = drawdown;
            }
        }
    }
    worst
}
