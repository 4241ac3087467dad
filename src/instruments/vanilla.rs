//! Plain-vanilla option contract definition used throughout the library.
//!
//! [`VanillaOption`] stores side, strike, expiry, and exercise rights
//! ([`crate::core::ExerciseStyle`]: European/American/Bermudan).
//! Validation enforces positive strike and expiry, and Bermudan-date
//! consistency within `(0, expiry]` (a strictly increasing schedule).

use crate::core::{ExerciseStyle, Instrument, OptionType, PricingError};

/// Vanilla option contract.
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Exercise style.
    pub exercise: ExerciseStyle,
}

impl VanillaOption {
    /// Builds a European call option.
    pub fn european_call(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            expiry,
            exercise: ExerciseStyle::European,
        }
    }

    /// Builds a European put option.
    pub fn european_put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::European,
        }
    }

    /// Builds an American call option.
    pub fn american_call(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            expiry,
            exercise: ExerciseStyle::American,
        }
    }

    /// Builds an American put option.
    pub fn american_put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::American,
        }
    }

    /// Builds a Bermudan option with explicit exercise dates.
    pub fn bermudan(option_type: OptionType, strike: f64, expiry: f64, dates: Vec<f64>) -> Self {
        Self {
            option_type,
            strike,
            expiry,
            exercise: ExerciseStyle::Bermudan { dates },
        }
    }

    /// Intrinsic value at the given spot.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidParameter`] when:
    /// - `strike <= 0`
    /// - `expiry <= 0`
    /// - Bermudan exercise dates are empty, not strictly increasing, or
    ///   outside `(0, expiry]`
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

        if let ExerciseStyle::Bermudan { dates } = &self.exercise {
            if dates.is_empty() {
                return Err(PricingError::InvalidParameter(
                    "bermudan exercise dates cannot be empty".to_string(),
                ));
            }
            if dates.iter().any(|&d| d <= 0.0 || d > self.expiry) {
                return Err(PricingError::InvalidParameter(
                    "bermudan exercise dates must lie in (0, expiry]".to_string(),
                ));
            }
            if dates.windows(2).any(|w| w[1] <= w[0]) {
                return Err(PricingError::InvalidParameter(
                    "bermudan exercise dates must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Instrument for VanillaOption {
    fn instrument_type(&self) -> &str {
        "VanillaOption"
    }
}
