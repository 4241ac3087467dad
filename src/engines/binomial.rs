//! Cox-Ross-Rubinstein binomial tree engine.
//!
//! References: Cox, Ross and Rubinstein (1979); Hull (11th ed.) Ch. 13.
//! Backward induction runs in a single reused buffer: the forward sweep
//! reads the old up-node before overwriting it, which reproduces the
//! two-buffer recursion in O(M) space and O(M^2) time.

use crate::core::{
    DiagKey, Diagnostics, ExerciseStyle, PricingEngine, PricingError, PricingResult,
};
use crate::instruments::VanillaOption;
use crate::market::Market;

/// Recombining CRR lattice engine for European and American exercise.
#[derive(Debug, Clone)]
pub struct BinomialTreeEngine {
    /// Number of tree steps.
    pub steps: usize,
}

impl BinomialTreeEngine {
    /// Creates a tree engine with the given number of steps.
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Creates a tree engine from the configured lattice step count.
    pub fn from_config(config: &crate::core::EngineConfig) -> Self {
        Self {
            steps: config.binomial_steps,
        }
    }
}

impl PricingEngine<VanillaOption> for BinomialTreeEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if self.steps == 0 {
            return Err(PricingError::InvalidParameter(
                "binomial steps must be > 0".to_string(),
            ));
        }

        let early_exercise = match instrument.exercise {
            ExerciseStyle::European => false,
            ExerciseStyle::American => true,
            ExerciseStyle::Bermudan { .. } => {
                return Err(PricingError::NotImplemented(
                    "bermudan exercise on the binomial engine; use the least-squares engine"
                        .to_string(),
                ));
            }
        };

        let dt = instrument.expiry / self.steps as f64;
        let u = (market.vol * dt.sqrt()).exp();
        let d = 1.0 / u;
        let growth = (market.rate * dt).exp();
        let p = (growth - d) / (u - d);
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PricingError::InconsistentModel(format!(
                "risk-neutral up-probability {p} outside [0, 1]"
            )));
        }
        let disc = (-market.rate * dt).exp();
        let disc_p = disc * p;
        let disc_1mp = disc * (1.0 - p);

        // Node (t, j) carries spot * u^j * d^(t-j); the multiplicative
        // recurrence avoids O(M^2) powf calls.
        let ratio = u / d;

        let mut values = vec![0.0_f64; self.steps + 1];
        {
            let mut st = market.spot * d.powi(self.steps as i32);
            for value in values.iter_mut() {
                *value = instrument.intrinsic(st);
                st *= ratio;
            }
        }

        let mut base = market.spot * d.powi(self.steps.saturating_sub(1) as i32);
        for t in (0..self.steps).rev() {
            if early_exercise {
                let mut st = base;
                for j in 0..=t {
                    let continuation = disc_p.mul_add(values[j + 1], disc_1mp * values[j]);
                    values[j] = continuation.max(instrument.intrinsic(st));
                    st *= ratio;
                }
            } else {
                for j in 0..=t {
                    values[j] = disc_p.mul_add(values[j + 1], disc_1mp * values[j]);
                }
            }
            base *= u;
        }

        let price = values[0];
        if !price.is_finite() {
            return Err(PricingError::NumericError(
                "tree root value is not finite".to_string(),
            ));
        }

        let mut diagnostics = Diagnostics::new();
        diagnostics.insert(DiagKey::TreeSteps, self.steps as f64);
        diagnostics.insert(DiagKey::UpProbability, p);

        Ok(PricingResult {
            price,
            stderr: None,
            diagnostics,
        })
    }
}
