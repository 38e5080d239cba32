//! ticklab core — engine, domain types, strategies, execution simulation.
//!
//! This crate contains the heart of the replay backtester:
//! - Domain types (observations, tape, orders, fills, portfolio, trace)
//! - Tick-by-tick event loop with a causality guard
//! - Execution model with latency and per-order cost
//! - Portfolio clamp policy (degrade, never crash)
//! - Strategy trait with the Dummy and BasicEwma implementations
//! - Seeded synthetic tape generation

pub mod data;
pub mod domain;
pub mod engine;
pub mod execution;
pub mod strategy;
