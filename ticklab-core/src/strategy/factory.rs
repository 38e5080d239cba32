//! Strategy factory — resolves a named spec into a runtime trait object.
//!
//! The registry is consulted once at run setup, outside the hot loop. The
//! option bag mirrors the launcher surface: the two optional sizing fields
//! are collapsed into a [`SizingPolicy`] here, so the invalid both-or-neither
//! state never reaches a constructor.

use serde::{Deserialize, Serialize};

use super::ewma::{BasicEwma, EwmaConfig, PricingPolicy, SizingPolicy};
use super::{Dummy, Strategy, StrategyConfigError};

/// Default smoothing factor when the option bag omits `beta`.
const DEFAULT_BETA: f64 = 0.9;

/// A strategy selected by name plus its option bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub name: String,
    #[serde(default)]
    pub params: StrategyParams,
}

impl StrategySpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: StrategyParams::default(),
        }
    }
}

/// Strategy-specific options, all optional so a launcher can pass through
/// whatever subset the user supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyParams {
    pub beta: Option<f64>,
    pub margin: Option<f64>,
    pub wait_time: Option<f64>,
    pub pricing: Option<PricingPolicy>,
    pub fixed_quantity: Option<u64>,
    pub proportional_quantity: Option<f64>,
}

impl StrategyParams {
    /// Collapse the two optional sizing fields into the tagged union,
    /// rejecting both-or-neither.
    pub fn sizing(&self) -> Result<SizingPolicy, StrategyConfigError> {
        match (self.fixed_quantity, self.proportional_quantity) {
            (Some(_), Some(_)) => Err(StrategyConfigError::AmbiguousSizing),
            (Some(n), None) => Ok(SizingPolicy::Fixed(n)),
            (None, Some(fraction)) => Ok(SizingPolicy::Proportional(fraction)),
            (None, None) => Err(StrategyConfigError::MissingSizing),
        }
    }
}

/// Create a strategy from a spec. Unknown names and invalid options are
/// fatal — there is nothing sensible to fall back to.
pub fn create_strategy(spec: &StrategySpec) -> Result<Box<dyn Strategy>, StrategyConfigError> {
    match spec.name.as_str() {
        "dummy" => Ok(Box::new(Dummy)),
        "basic-ewma" => {
            let params = &spec.params;
            let config = EwmaConfig {
                beta: params.beta.unwrap_or(DEFAULT_BETA),
                margin: params.margin.unwrap_or(0.0),
                wait_time: params.wait_time.unwrap_or(0.0),
                pricing: params.pricing.unwrap_or(PricingPolicy::Aggressive),
                sizing: params.sizing()?,
            };
            Ok(Box::new(BasicEwma::new(config)?))
        }
        other => Err(StrategyConfigError::UnknownStrategy(other.to_string())),
    }
}
