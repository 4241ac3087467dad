//! Flat per-instrument pricing surface.
//!
//! Each function snapshots the configuration, builds the instrument and
//! market state, dispatches to the right engine, and returns the single
//! discounted price. This is the library-level rendering of the service
//! entry points; transport concerns (handles, sentinel returns) live in
//! the out-of-process layer.

use crate::core::{BarrierSpec, BarrierVariant, EngineConfig, ModelKind, OptionType, PricingError, PricingEngine};
use crate::engines::{BinomialTreeEngine, LsmEngine, MonteCarloEngine};
use crate::instruments::{AsianOption, BarrierOption, LookbackOption, VanillaOption};
use crate::market::Market;

fn require_gbm(config: &EngineConfig) -> Result<(), PricingError> {
    match config.model {
        ModelKind::Gbm => Ok(()),
        ModelKind::Sabr => Err(PricingError::NotImplemented(
            "SABR dynamics are reserved; only GBM is implemented".to_string(),
        )),
    }
}

fn price_european(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = VanillaOption {
        option_type,
        strike,
        expiry: maturity,
        exercise: crate::core::ExerciseStyle::European,
    };
    let result = MonteCarloEngine::from_config(config).price(&option, &Market::new(spot, rate, vol))?;
    Ok(result.price)
}

/// Monte Carlo price of a European call.
pub fn price_european_call(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
) -> Result<f64, PricingError> {
    price_european(config, OptionType::Call, spot, strike, rate, vol, maturity)
}

/// Monte Carlo price of a European put.
pub fn price_european_put(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
) -> Result<f64, PricingError> {
    price_european(config, OptionType::Put, spot, strike, rate, vol, maturity)
}

#[allow(clippy::too_many_arguments)]
fn price_asian(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    observations: usize,
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = AsianOption::new(option_type, strike, maturity, observations);
    let result = MonteCarloEngine::from_config(config).price(&option, &Market::new(spot, rate, vol))?;
    Ok(result.price)
}

/// Monte Carlo price of an arithmetic-average Asian call.
#[allow(clippy::too_many_arguments)]
pub fn price_asian_arithmetic_call(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    observations: usize,
) -> Result<f64, PricingError> {
    price_asian(config, OptionType::Call, spot, strike, rate, vol, maturity, observations)
}

/// Monte Carlo price of an arithmetic-average Asian put.
#[allow(clippy::too_many_arguments)]
pub fn price_asian_arithmetic_put(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    observations: usize,
) -> Result<f64, PricingError> {
    price_asian(config, OptionType::Put, spot, strike, rate, vol, maturity, observations)
}

#[allow(clippy::too_many_arguments)]
fn price_american_lsm(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    exercise_dates: usize,
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = VanillaOption {
        option_type,
        strike,
        expiry: maturity,
        exercise: crate::core::ExerciseStyle::American,
    };
    let engine = LsmEngine::from_config_american(config, exercise_dates);
    Ok(engine.price(&option, &Market::new(spot, rate, vol))?.price)
}

/// Least-squares Monte Carlo price of an American call with
/// `exercise_dates` uniformly spaced exercise opportunities.
#[allow(clippy::too_many_arguments)]
pub fn price_american_call_lsm(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    exercise_dates: usize,
) -> Result<f64, PricingError> {
    price_american_lsm(config, OptionType::Call, spot, strike, rate, vol, maturity, exercise_dates)
}

/// Least-squares Monte Carlo price of an American put.
#[allow(clippy::too_many_arguments)]
pub fn price_american_put_lsm(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    exercise_dates: usize,
) -> Result<f64, PricingError> {
    price_american_lsm(config, OptionType::Put, spot, strike, rate, vol, maturity, exercise_dates)
}

#[allow(clippy::too_many_arguments)]
fn price_american_binomial(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    steps: usize,
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = VanillaOption {
        option_type,
        strike,
        expiry: maturity,
        exercise: crate::core::ExerciseStyle::American,
    };
    let engine = BinomialTreeEngine::new(steps);
    Ok(engine.price(&option, &Market::new(spot, rate, vol))?.price)
}

/// Binomial-tree price of an American call. This is the reference engine
/// for American exercise.
#[allow(clippy::too_many_arguments)]
pub fn price_american_call_binomial(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    steps: usize,
) -> Result<f64, PricingError> {
    price_american_binomial(config, OptionType::Call, spot, strike, rate, vol, maturity, steps)
}

/// Binomial-tree price of an American put.
#[allow(clippy::too_many_arguments)]
pub fn price_american_put_binomial(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    steps: usize,
) -> Result<f64, PricingError> {
    price_american_binomial(config, OptionType::Put, spot, strike, rate, vol, maturity, steps)
}

#[allow(clippy::too_many_arguments)]
fn price_bermudan(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    exercise_dates: &[f64],
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = VanillaOption::bermudan(option_type, strike, maturity, exercise_dates.to_vec());
    let engine = LsmEngine::from_config_bermudan(config);
    Ok(engine.price(&option, &Market::new(spot, rate, vol))?.price)
}

/// Least-squares Monte Carlo price of a Bermudan call. Maturity is
/// explicit; exercise dates must be strictly increasing within
/// `(0, maturity]`.
#[allow(clippy::too_many_arguments)]
pub fn price_bermudan_call(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    exercise_dates: &[f64],
) -> Result<f64, PricingError> {
    price_bermudan(config, OptionType::Call, spot, strike, rate, vol, maturity, exercise_dates)
}

/// Least-squares Monte Carlo price of a Bermudan put.
#[allow(clippy::too_many_arguments)]
pub fn price_bermudan_put(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    exercise_dates: &[f64],
) -> Result<f64, PricingError> {
    price_bermudan(config, OptionType::Put, spot, strike, rate, vol, maturity, exercise_dates)
}

#[allow(clippy::too_many_arguments)]
fn price_barrier(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    barrier_level: f64,
    variant: BarrierVariant,
    rebate: f64,
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = BarrierOption::new(
        option_type,
        strike,
        maturity,
        BarrierSpec::from_variant(variant, barrier_level, rebate),
    );
    let result = MonteCarloEngine::from_config(config).price(&option, &Market::new(spot, rate, vol))?;
    Ok(result.price)
}

/// Monte Carlo price of a single-barrier call.
#[allow(clippy::too_many_arguments)]
pub fn price_barrier_call(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    barrier_level: f64,
    variant: BarrierVariant,
    rebate: f64,
) -> Result<f64, PricingError> {
    price_barrier(config, OptionType::Call, spot, strike, rate, vol, maturity, barrier_level, variant, rebate)
}

/// Monte Carlo price of a single-barrier put.
#[allow(clippy::too_many_arguments)]
pub fn price_barrier_put(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    barrier_level: f64,
    variant: BarrierVariant,
    rebate: f64,
) -> Result<f64, PricingError> {
    price_barrier(config, OptionType::Put, spot, strike, rate, vol, maturity, barrier_level, variant, rebate)
}

#[allow(clippy::too_many_arguments)]
fn price_lookback(
    config: &EngineConfig,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    fixed_strike: bool,
) -> Result<f64, PricingError> {
    require_gbm(config)?;
    let option = LookbackOption::new(option_type, strike, maturity, fixed_strike);
    let result = MonteCarloEngine::from_config(config).price(&option, &Market::new(spot, rate, vol))?;
    Ok(result.price)
}

/// Monte Carlo price of a lookback call (fixed or floating strike).
#[allow(clippy::too_many_arguments)]
pub fn price_lookback_call(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    fixed_strike: bool,
) -> Result<f64, PricingError> {
    price_lookback(config, OptionType::Call, spot, strike, rate, vol, maturity, fixed_strike)
}

/// Monte Carlo price of a lookback put (fixed or floating strike).
#[allow(clippy::too_many_arguments)]
pub fn price_lookback_put(
    config: &EngineConfig,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    maturity: f64,
    fixed_strike: bool,
) -> Result<f64, PricingError> {
    price_lookback(config, OptionType::Put, spot, strike, rate, vol, maturity, fixed_strike)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> EngineConfig {
        let mut config = EngineConfig::new();
        config.set_num_paths(2_000);
        config.set_num_steps(16);
        config
    }

    #[test]
    fn sabr_model_is_reserved() {
        let mut config = fast_config();
        config.set_model(ModelKind::Sabr);
        let err = price_european_call(&config, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap_err();
        assert!(matches!(err, PricingError::NotImplemented(_)));
    }

    #[test]
    fn invalid_market_parameters_are_rejected_at_entry() {
        let config = fast_config();
        for (s, k, vol, t) in [
            (0.0, 100.0, 0.2, 1.0),
            (100.0, -5.0, 0.2, 1.0),
            (100.0, 100.0, -0.2, 1.0),
            (100.0, 100.0, 0.2, 0.0),
        ] {
            let err = price_european_call(&config, s, k, 0.05, vol, t).unwrap_err();
            assert!(
                matches!(err, PricingError::InvalidParameter(_)),
                "expected InvalidParameter for (s={s}, k={k}, vol={vol}, t={t})"
            );
        }
    }

    #[test]
    fn empty_bermudan_schedule_is_invalid() {
        let config = fast_config();
        let err = price_bermudan_put(&config, 100.0, 100.0, 0.05, 0.2, 1.0, &[]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));
    }

    #[test]
    fn zero_tree_steps_is_invalid() {
        let config = fast_config();
        let err =
            price_american_put_binomial(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 0).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));
    }

    #[test]
    fn zero_exercise_dates_is_invalid_for_lsm() {
        let config = fast_config();
        let err = price_american_put_lsm(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 0).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));
    }

    #[test]
    fn zero_asian_observations_is_invalid() {
        let config = fast_config();
        let err =
            price_asian_arithmetic_call(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 0).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));
    }

    #[test]
    fn all_supported_payoffs_price_non_negative() {
        let config = fast_config();
        let prices = [
            price_european_call(&config, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap(),
            price_european_put(&config, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap(),
            price_asian_arithmetic_call(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 12).unwrap(),
            price_american_put_lsm(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 10).unwrap(),
            price_american_put_binomial(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 64).unwrap(),
            price_bermudan_put(&config, 100.0, 100.0, 0.05, 0.2, 1.0, &[0.5, 1.0]).unwrap(),
            price_barrier_call(&config, 100.0, 100.0, 0.05, 0.2, 1.0, 130.0, BarrierVariant::UpAndOut, 0.0).unwrap(),
            price_lookback_call(&config, 100.0, 100.0, 0.05, 0.2, 1.0, true).unwrap(),
            price_lookback_put(&config, 100.0, 100.0, 0.05, 0.2, 1.0, false).unwrap(),
        ];
        for price in prices {
            assert!(price >= 0.0, "price {price} should be non-negative");
        }
    }
}
