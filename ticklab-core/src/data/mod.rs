//! Data generation helpers for the engine.
//!
//! Real tapes come from the loader in the runner crate; this module only
//! hosts the seeded synthetic generator used by demos, benches, and tests.

pub mod synthetic;

pub use synthetic::generate_synthetic_tape;
