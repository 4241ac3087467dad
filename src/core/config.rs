//! Engine configuration snapshot.
//!
//! A configuration is owned by the caller, mutated freely between pricing
//! calls, and read immutably during a call. Each call derives its RNG from
//! the configured seed, so repeating a call with an unchanged configuration
//! reproduces the result bit for bit.

use crate::core::{ModelKind, PricingError};

/// Reserved SABR dynamics parameters. Unused until a SABR simulator lands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SabrParams {
    /// Initial volatility.
    pub alpha: f64,
    /// CEV exponent.
    pub beta: f64,
    /// Spot/vol correlation.
    pub rho: f64,
    /// Volatility of volatility.
    pub nu: f64,
}

/// Simulation and variance-reduction knobs shared by every pricing call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// RNG seed; reseeding resets the generator state exactly.
    pub seed: u64,
    /// Number of simulated paths per Monte Carlo estimate.
    pub num_paths: usize,
    /// Number of time steps per simulated path.
    pub num_steps: usize,
    /// Number of lattice steps for the binomial engine.
    pub binomial_steps: usize,
    /// Pair every draw with its sign-flipped twin.
    pub antithetic: bool,
    /// Subtract a Black-Scholes terminal control from the estimator.
    pub control_variates: bool,
    /// Replace per-path draws with a shuffled stratified vector
    /// (honored for terminal-payoff instruments only).
    pub stratified_sampling: bool,
    /// Shift the Brownian drift and reweight by the likelihood ratio.
    pub importance_sampling: bool,
    /// Drift shift applied per standardized increment when importance
    /// sampling is enabled.
    pub drift_shift: f64,
    /// Model selector.
    pub model: ModelKind,
    /// Reserved SABR parameters.
    pub sabr: SabrParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 12_345,
            num_paths: 100_000,
            num_steps: 252,
            binomial_steps: 100,
            antithetic: true,
            control_variates: false,
            stratified_sampling: false,
            importance_sampling: false,
            drift_shift: 0.0,
            model: ModelKind::Gbm,
            sabr: SabrParams::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the library defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn set_num_paths(&mut self, num_paths: usize) {
        self.num_paths = num_paths;
    }

    pub fn set_num_steps(&mut self, num_steps: usize) {
        self.num_steps = num_steps;
    }

    pub fn set_binomial_steps(&mut self, binomial_steps: usize) {
        self.binomial_steps = binomial_steps;
    }

    pub fn set_antithetic(&mut self, enabled: bool) {
        self.antithetic = enabled;
    }

    pub fn set_control_variates(&mut self, enabled: bool) {
        self.control_variates = enabled;
    }

    pub fn set_stratified_sampling(&mut self, enabled: bool) {
        self.stratified_sampling = enabled;
    }

    pub fn set_importance_sampling(&mut self, enabled: bool, drift_shift: f64) {
        self.importance_sampling = enabled;
        self.drift_shift = drift_shift;
    }

    pub fn set_model(&mut self, model: ModelKind) {
        self.model = model;
    }

    /// Drift shift actually applied by the simulators.
    pub fn effective_drift_shift(&self) -> f64 {
        if self.importance_sampling {
            self.drift_shift
        } else {
            0.0
        }
    }

    /// Validates the simulation knobs.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.num_paths == 0 {
            return Err(PricingError::InvalidParameter(
                "num_paths must be > 0".to_string(),
            ));
        }
        if self.num_steps == 0 {
            return Err(PricingError::InvalidParameter(
                "num_steps must be > 0".to_string(),
            ));
        }
        if !self.drift_shift.is_finite() {
            return Err(PricingError::InvalidParameter(
                "drift_shift must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
