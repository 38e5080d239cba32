//! Tick-by-tick event loop — the heart of the replay engine.
//!
//! Per observation, in order:
//! 1. Expose the visible prefix of the tape to the strategy (causality
//!    guard: the slice ends at the current tick, so the strategy cannot see
//!    the future).
//! 2. Stamp each request into an order at the current timestamp.
//! 3. Resolve each order through the execution model.
//! 4. Apply fills under the clamp policy.
//! 5. Append a trace record with the post-fill portfolio snapshot.
//!
//! Tape exhausted is the normal terminal condition. The loop performs no
//! I/O, reads no clock, and uses no RNG — identical inputs replay to
//! bit-identical traces.

use crate::domain::{IdGen, MarketTape, Order, Portfolio, TickRecord, Trace};
use crate::execution::ExecutionModel;
use crate::strategy::Strategy;

/// Replay `tape` through `strategy`, resolving orders via `execution` and
/// mutating `portfolio`, which the engine owns for the duration of the run.
/// The returned trace carries a portfolio snapshot per tick; the final
/// snapshot is the frozen end state.
pub fn run_backtest(
    tape: &MarketTape,
    strategy: &mut dyn Strategy,
    execution: &ExecutionModel,
    mut portfolio: Portfolio,
) -> Trace {
    let mut trace = Trace::new(tape.symbol());
    let mut id_gen = IdGen::default();
    let observations = tape.observations();

    for (index, obs) in observations.iter().enumerate() {
        let visible = &observations[..=index];
        debug_assert!(
            visible.last().map(|o| o.timestamp) == Some(obs.timestamp),
            "visible history must end at the current tick"
        );

        let requests = strategy.decide(visible, &portfolio);

        let mut orders = Vec::with_capacity(requests.len());
        let mut fills = Vec::with_capacity(requests.len());
        let mut shortfalls = Vec::new();

        for request in requests {
            if request.quantity == 0 {
                continue;
            }
            let order = Order {
                id: id_gen.next_order_id(),
                side: request.side,
                quantity: request.quantity,
                limit: request.limit,
                submitted_at: obs.timestamp,
            };
            let fill = execution.execute(&order, tape);
            if let Some(shortfall) =
                super::portfolio_update::apply_fill(&mut portfolio, &order, &fill)
            {
                shortfalls.push(shortfall);
            }
            orders.push(order);
            fills.push(fill);
        }

        let mark = if obs.has_both_sides() {
            obs.mid_price()
        } else {
            obs.last_price
        };

        trace.push(TickRecord {
            timestamp: obs.timestamp,
            portfolio: portfolio.clone(),
            orders,
            fills,
            shortfalls,
            mark,
        });
    }

    trace
}
