//! Synthetic tape generation — a seeded random walk for smoke runs.
//!
//! Developer-only data: results produced on a synthetic tape say nothing
//! about a real market. The walk is fully determined by the seed, so
//! benches and tests get stable input.

use crate::domain::{MarketObservation, MarketTape};
use chrono::{TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed wall-clock anchor; the generator must not read the real clock.
const BASE_YMD_HMS: (i32, u32, u32, u32, u32, u32) = (2024, 1, 2, 10, 0, 0);

/// Interval between synthetic observations.
const TICK_INTERVAL_MS: i64 = 100;

/// Half-spread applied around the walking mid.
const HALF_SPREAD: f64 = 0.05;

/// Generate a random-walk tape of `ticks` observations.
pub fn generate_synthetic_tape(symbol: &str, ticks: usize, seed: u64) -> MarketTape {
    let (y, mo, d, h, mi, s) = BASE_YMD_HMS;
    let base = Utc
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("fixed base timestamp is valid");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut mid: f64 = 100.0;
    let observations = (0..ticks)
        .map(|i| {
            mid = (mid + rng.gen_range(-0.25..0.25)).max(1.0);
            let mid = (mid * 100.0).round() / 100.0;
            MarketObservation {
                timestamp: base + TimeDelta::milliseconds(i as i64 * TICK_INTERVAL_MS),
                bid: mid - HALF_SPREAD,
                ask: mid + HALF_SPREAD,
                bid_size: rng.gen_range(50..500),
                ask_size: rng.gen_range(50..500),
                last_price: mid,
                last_size: rng.gen_range(1..100),
            }
        })
        .collect();

    MarketTape::new(symbol, observations).expect("generated timestamps are monotonic")
}
