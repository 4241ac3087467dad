//! Arithmetic-average Asian option contract.

use crate::core::{Instrument, OptionType, PricingError};

/// Fixed-strike arithmetic Asian option with `observations` equally
/// spaced averaging dates.
#[derive(Debug, Clone, PartialEq)]
pub struct AsianOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Number of equally spaced averaging observations.
    pub observations: usize,
}

impl AsianOption {
    pub fn new(option_type: OptionType, strike: f64, expiry: f64, observations: usize) -> Self {
        Self {
            option_type,
            strike,
            expiry,
            observations,
        }
    }

    /// Arithmetic average of the `observations` sampled path values.
    ///
    /// Observation `i` (1-based) reads path index `floor(i * L / m)`,
    /// clamped to the terminal node.
    pub fn average_from_path(&self, path: &[f64]) -> f64 {
        let last = path.len() - 1;
        let m = self.observations;
        let sum: f64 = (1..=m)
            .map(|i| path[((i * last) / m).min(last)])
            .sum();
        sum / m as f64
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
        if self.observations == 0 {
            return Err(PricingError::InvalidParameter(
                "asian option needs at least one averaging observation".to_string(),
            ));
        }
        Ok(())
    }
}

impl Instrument for AsianOption {
    fn instrument_type(&self) -> &str {
        "AsianOption"
    }
}
