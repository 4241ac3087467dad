//! Lookback option contract (fixed or floating strike).

use crate::core::{Instrument, OptionType, PricingError};

/// Lookback option over the discretely sampled path extrema.
///
/// Fixed strike pays against `strike`; floating strike pays the terminal
/// spot against the path extremum, which makes the payoff non-negative by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LookbackOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level (used by the fixed-strike variant).
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Fixed-strike when true, floating-strike otherwise.
    pub fixed_strike: bool,
}

impl LookbackOption {
    pub fn new(option_type: OptionType, strike: f64, expiry: f64, fixed_strike: bool) -> Self {
        Self {
            option_type,
            strike,
            expiry,
            fixed_strike,
        }
    }

    /// Undiscounted payoff of one simulated path.
    pub fn payoff_from_path(&self, path: &[f64]) -> f64 {
        let mut max_spot = f64::NEG_INFINITY;
        let mut min_spot = f64::INFINITY;
        for &s in path {
            max_spot = max_spot.max(s);
            min_spot = min_spot.min(s);
        }
        let terminal = path[path.len() - 1];

        match (self.fixed_strike, self.option_type) {
            (true, OptionType::Call) => (max_spot - self.strike).max(0.0),
            (true, OptionType::Put) => (self.strike - min_spot).max(0.0),
            (false, OptionType::Call) => terminal - min_spot,
            (false, OptionType::Put) => max_spot - terminal,
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
        Ok(())
    }
}

impl Instrument for LookbackOption {
    fn instrument_type(&self) -> &str {
        "LookbackOption"
    }
}
