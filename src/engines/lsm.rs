//! Least-squares Monte Carlo engine for early-exercise options.
//!
//! Longstaff and Schwartz (2001): simulate a bank of forward paths, then
//! walk the exercise grid backwards, regressing discounted continuation
//! cash-flows on a cubic polynomial of spot over the in-the-money paths.
//!
//! The engine is memory-bound: the path bank holds `num_paths * (K + 1)`
//! nodes and is allocated once per call.

use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;

use crate::core::{
    DiagKey, Diagnostics, ExerciseStyle, PricingEngine, PricingError, PricingResult,
};
use crate::instruments::VanillaOption;
use crate::market::Market;
use crate::math::rng::{generate_normal_samples, Mt19937_64};
use crate::models::Gbm;

/// Minimum in-the-money sample for a stable cubic fit.
const MIN_REGRESSION_PATHS: usize = 4;

/// Deep-in-the-money fallback threshold as a fraction of strike, used
/// when too few paths are in the money to regress.
const DEEP_ITM_FRACTION: f64 = 0.2;

/// Regression-based Monte Carlo engine (American and Bermudan exercise).
///
/// `num_steps` is the exercise grid resolution: for American contracts it
/// is the number of admissible exercise dates (uniformly spaced in
/// `(0, T]`); for Bermudan contracts it is the simulation grid onto which
/// the exercise dates are mapped by `floor(t_k / T * L)`.
#[derive(Debug, Clone)]
pub struct LsmEngine {
    /// Number of Monte Carlo paths in the bank.
    pub num_paths: usize,
    /// Exercise grid resolution.
    pub num_steps: usize,
    /// RNG seed.
    pub seed: u64,
}

impl LsmEngine {
    pub fn new(num_paths: usize, num_steps: usize, seed: u64) -> Self {
        Self {
            num_paths,
            num_steps,
            seed,
        }
    }

    /// American engine from a configuration: the grid is the requested
    /// number of exercise dates.
    pub fn from_config_american(config: &crate::core::EngineConfig, exercise_dates: usize) -> Self {
        Self {
            num_paths: config.num_paths,
            num_steps: exercise_dates,
            seed: config.seed,
        }
    }

    /// Bermudan engine from a configuration: the grid is the configured
    /// per-path step count.
    pub fn from_config_bermudan(config: &crate::core::EngineConfig) -> Self {
        Self {
            num_paths: config.num_paths,
            num_steps: config.num_steps,
            seed: config.seed,
        }
    }

    /// Marks the grid steps at which exercise is admissible.
    fn exercise_flags(&self, instrument: &VanillaOption) -> Vec<bool> {
        let steps = self.num_steps;
        let mut flags = vec![false; steps + 1];
        match &instrument.exercise {
            ExerciseStyle::European => {}
            ExerciseStyle::American => {
                for flag in flags.iter_mut().take(steps).skip(1) {
                    *flag = true;
                }
            }
            ExerciseStyle::Bermudan { dates } => {
                for &date in dates {
                    let idx = ((date / instrument.expiry) * steps as f64).floor() as usize;
                    flags[idx.min(steps)] = true;
                }
            }
        }
        // The maturity node always pays the terminal kernel.
        flags[steps] = true;
        flags
    }
}

/// Solves the 4x4 normal equations for the cubic monomial basis.
/// Partial-pivoted elimination inside the LU factorization; a singular
/// pivot yields the all-zero coefficient vector, which makes every
/// in-the-money path exercise (continuation collapses to zero).
fn regress_cubic(spots: &[f64], responses: &[f64]) -> DVector<f64> {
    let n = spots.len();
    let mut x = DMatrix::<f64>::zeros(n, 4);
    let mut y = DVector::<f64>::zeros(n);
    for (row, (&s, &cf)) in spots.iter().zip(responses.iter()).enumerate() {
        x[(row, 0)] = 1.0;
        x[(row, 1)] = s;
        x[(row, 2)] = s * s;
        x[(row, 3)] = s * s * s;
        y[row] = cf;
    }

    let xtx = x.transpose() * &x;
    let xty = x.transpose() * &y;
    xtx.lu()
        .solve(&xty)
        .unwrap_or_else(|| DVector::<f64>::zeros(4))
}

#[inline]
fn continuation_value(beta: &DVector<f64>, s: f64) -> f64 {
    beta[3].mul_add(s, beta[2]).mul_add(s, beta[1]).mul_add(s, beta[0])
}

fn mean_and_stderr(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = if values.len() > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    (mean, (var / n).sqrt())
}

impl PricingEngine<VanillaOption> for LsmEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if self.num_steps == 0 {
            return Err(PricingError::InvalidParameter(
                "exercise grid needs at least one step".to_string(),
            ));
        }
        if self.num_paths < MIN_REGRESSION_PATHS {
            return Err(PricingError::InvalidParameter(format!(
                "least-squares regression needs at least {MIN_REGRESSION_PATHS} paths"
            )));
        }

        let steps = self.num_steps;
        let dt = instrument.expiry / steps as f64;
        let disc = (-market.rate * dt).exp();
        let gbm = Gbm {
            mu: market.rate,
            sigma: market.vol,
        };

        // Forward path bank, built once and then read-only.
        let mut rng = Mt19937_64::seed_from_u64(self.seed);
        let mut paths = vec![vec![0.0_f64; steps + 1]; self.num_paths];
        for path in &mut paths {
            let normals = generate_normal_samples(&mut rng, steps);
            path[0] = market.spot;
            for (i, &z) in normals.iter().enumerate() {
                path[i + 1] = gbm.step_exact(path[i], dt, z);
            }
        }

        let flags = self.exercise_flags(instrument);

        // Cash-flow state: terminal payoff at maturity, exercise step
        // defaulting to the maturity node.
        let mut cash_flows: Vec<f64> = paths
            .iter()
            .map(|path| instrument.intrinsic(path[steps]))
            .collect();
        let mut exercise_step = vec![steps; self.num_paths];

        let mut itm_spots: Vec<f64> = Vec::with_capacity(self.num_paths);
        let mut itm_flows: Vec<f64> = Vec::with_capacity(self.num_paths);
        let mut itm_index: Vec<usize> = Vec::with_capacity(self.num_paths);

        for t in (1..steps).rev() {
            for cf in &mut cash_flows {
                *cf *= disc;
            }

            if !flags[t] {
                continue;
            }

            itm_spots.clear();
            itm_flows.clear();
            itm_index.clear();
            for (idx, path) in paths.iter().enumerate() {
                let spot = path[t];
                if instrument.intrinsic(spot) > 0.0 {
                    itm_spots.push(spot);
                    itm_flows.push(cash_flows[idx]);
                    itm_index.push(idx);
                }
            }

            if itm_spots.len() >= MIN_REGRESSION_PATHS {
                let beta = regress_cubic(&itm_spots, &itm_flows);
                for (&idx, &spot) in itm_index.iter().zip(itm_spots.iter()) {
                    let exercise = instrument.intrinsic(spot);
                    if exercise > continuation_value(&beta, spot) {
                        cash_flows[idx] = exercise;
                        exercise_step[idx] = t;
                    }
                }
            } else {
                // Too few points to regress: exercise only deep in the money.
                let threshold = DEEP_ITM_FRACTION * instrument.strike;
                for (idx, path) in paths.iter().enumerate() {
                    let intrinsic = instrument.intrinsic(path[t]);
                    if intrinsic > threshold {
                        cash_flows[idx] = intrinsic;
                        exercise_step[idx] = t;
                    }
                }
            }
        }

        // Bring cash-flows from the first grid step to valuation time.
        for cf in &mut cash_flows {
            *cf *= disc;
        }

        let (price, stderr) = mean_and_stderr(&cash_flows);
        if !price.is_finite() {
            return Err(PricingError::NumericError(
                "cash-flow average is not finite".to_string(),
            ));
        }

        let n = self.num_paths as f64;
        let mean_exercise_time =
            exercise_step.iter().map(|&s| s as f64).sum::<f64>() * dt / n;
        let early = exercise_step.iter().filter(|&&s| s < steps).count();

        let mut diagnostics = Diagnostics::new();
        diagnostics.insert(DiagKey::NumPaths, self.num_paths as f64);
        diagnostics.insert(DiagKey::NumSteps, steps as f64);
        diagnostics.insert(DiagKey::MeanExerciseTime, mean_exercise_time);
        diagnostics.insert(DiagKey::EarlyExercisePct, 100.0 * early as f64 / n);

        Ok(PricingResult {
            price,
            stderr: Some(stderr),
            diagnostics,
        })
    }
}
