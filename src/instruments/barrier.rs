//! Single-barrier option contract.
//!
//! Knock events are detected on the discretely sampled path, which biases
//! knock-out prices high (and knock-in prices low) versus continuous
//! monitoring. The bias shrinks with the step count and is not corrected.

use crate::core::{BarrierSpec, BarrierStyle, Instrument, OptionType, PricingError};

/// Barrier option contract.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Barrier terms.
    pub barrier: BarrierSpec,
}

impl BarrierOption {
    pub fn new(option_type: OptionType, strike: f64, expiry: f64, barrier: BarrierSpec) -> Self {
        Self {
            option_type,
            strike,
            expiry,
            barrier,
        }
    }

    /// Undiscounted payoff of one simulated path: the terminal kernel when
    /// the option survives (out) or activates (in), the rebate otherwise.
    pub fn payoff_from_path(&self, path: &[f64]) -> f64 {
        let hit = self.barrier.breached(path);
        let active = match self.barrier.style {
            BarrierStyle::In => hit,
            BarrierStyle::Out => !hit,
        };

        if active {
            self.option_type.payoff(path[path.len() - 1], self.strike)
        } else {
            self.barrier.rebate
        }
    }

    /// Validates instrument fields.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.strike > 0.0 && self.strike.is_finite()) {
            return Err(PricingError::InvalidParameter(
                "strike must be > 0 and finite".to_string(),
            ));
        }
        if !(self.expiry > 0.0 && self.expiry.is_finite()) {
            return Err(PricingError::InvalidParameter(
                "expiry must be > 0 and finite".to_string(),
            ));
        }
        if !(self.barrier.level > 0.0 && self.barrier.level.is_finite()) {
            return Err(PricingError::InvalidParameter(
                "barrier level must be > 0 and finite".to_string(),
            ));
        }
        if !(self.barrier.rebate >= 0.0 && self.barrier.rebate.is_finite()) {
            return Err(PricingError::InvalidParameter(
                "barrier rebate must be >= 0 and finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Instrument for BarrierOption {
    fn instrument_type(&self) -> &str {
        "BarrierOption"
    }
}
