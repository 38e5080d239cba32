//! Domain types for ticklab.

pub mod fill;
pub mod observation;
pub mod order;
pub mod portfolio;
pub mod tape;
pub mod trace;

pub use fill::{Fill, RejectReason};
pub use observation::MarketObservation;
pub use order::{IdGen, Order, OrderId, OrderRequest, OrderSide};
pub use portfolio::Portfolio;
pub use tape::{MarketTape, TapeError};
pub use trace::{Shortfall, ShortfallReason, TickRecord, Trace};

/// Symbol type alias
pub type Symbol = String;
