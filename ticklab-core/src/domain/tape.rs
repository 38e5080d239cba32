//! MarketTape — ordered, immutable observation sequence for one instrument.

use super::observation::MarketObservation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected while constructing a tape.
#[derive(Debug, Error)]
pub enum TapeError {
    #[error("observation {index} is out of order: {timestamp} precedes {previous}")]
    OutOfOrder {
        index: usize,
        timestamp: DateTime<Utc>,
        previous: DateTime<Utc>,
    },
}

/// A fully materialized, read-only market history for a single instrument.
///
/// Timestamps are non-decreasing — enforced at construction, relied on by
/// the binary search in [`resolve_at`](MarketTape::resolve_at). The engine
/// and execution model only ever borrow the tape; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTape {
    symbol: String,
    observations: Vec<MarketObservation>,
}

impl MarketTape {
    /// Build a tape, rejecting out-of-order timestamps. An empty tape is
    /// valid and replays to an empty trace.
    pub fn new(
        symbol: impl Into<String>,
        observations: Vec<MarketObservation>,
    ) -> Result<Self, TapeError> {
        for (index, pair) in observations.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(TapeError::OutOfOrder {
                    index: index + 1,
                    timestamp: pair[1].timestamp,
                    previous: pair[0].timestamp,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            observations,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MarketObservation> {
        self.observations.get(index)
    }

    pub fn observations(&self) -> &[MarketObservation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&MarketObservation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&MarketObservation> {
        self.observations.last()
    }

    /// The earliest observation with `timestamp >= target`, or `None` when
    /// the target lies beyond the end of the tape.
    ///
    /// Among observations sharing a timestamp, the earliest one wins.
    pub fn resolve_at(&self, target: DateTime<Utc>) -> Option<(usize, &MarketObservation)> {
        let index = self
            .observations
            .partition_point(|obs| obs.timestamp < target);
        self.observations.get(index).map(|obs| (index, obs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn obs_at(secs: i64, price: f64) -> MarketObservation {
        MarketObservation {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
                + TimeDelta::seconds(secs),
            bid: price - 0.05,
            ask: price + 0.05,
            bid_size: 100,
            ask_size: 100,
            last_price: price,
            last_size: 10,
        }
    }

    #[test]
    fn accepts_non_decreasing_timestamps() {
        let tape =
            MarketTape::new("TST", vec![obs_at(0, 100.0), obs_at(0, 100.5), obs_at(1, 101.0)]);
        assert!(tape.is_ok());
        assert_eq!(tape.unwrap().len(), 3);
    }

    #[test]
    fn rejects_out_of_order_timestamps() {
        let err = MarketTape::new("TST", vec![obs_at(5, 100.0), obs_at(3, 101.0)]).unwrap_err();
        assert!(matches!(err, TapeError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn empty_tape_is_valid() {
        let tape = MarketTape::new("TST", vec![]).unwrap();
        assert!(tape.is_empty());
        assert!(tape.first().is_none());
    }

    #[test]
    fn resolve_at_finds_next_observation() {
        let tape =
            MarketTape::new("TST", vec![obs_at(0, 100.0), obs_at(2, 101.0), obs_at(4, 99.0)])
                .unwrap();
        let target = obs_at(1, 0.0).timestamp;
        let (index, obs) = tape.resolve_at(target).unwrap();
        assert_eq!(index, 1);
        assert_eq!(obs.last_price, 101.0);
    }

    #[test]
    fn resolve_at_exact_timestamp_hits_it() {
        let tape = MarketTape::new("TST", vec![obs_at(0, 100.0), obs_at(2, 101.0)]).unwrap();
        let (index, _) = tape.resolve_at(obs_at(2, 0.0).timestamp).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn resolve_at_tie_earliest_wins() {
        let tape =
            MarketTape::new("TST", vec![obs_at(0, 100.0), obs_at(2, 101.0), obs_at(2, 102.0)])
                .unwrap();
        let (index, obs) = tape.resolve_at(obs_at(2, 0.0).timestamp).unwrap();
        assert_eq!(index, 1);
        assert_eq!(obs.last_price, 101.0);
    }

    #[test]
    fn resolve_at_past_end_is_none() {
        let tape = MarketTape::new("TST", vec![obs_at(0, 100.0)]).unwrap();
        assert!(tape.resolve_at(obs_at(1, 0.0).timestamp).is_none());
    }
}
