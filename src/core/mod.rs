//! Core traits, common domain types, and library-wide result/error structures.

use crate::market::Market;

pub mod config;
pub mod types;

pub use config::{EngineConfig, SabrParams};
pub use types::*;

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics and bindings.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market state.
    fn price(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError>;
}

/// Compact key set for engine diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKey {
    NumPaths,
    NumSteps,
    TreeSteps,
    UpProbability,
    MeanExerciseTime,
    EarlyExercisePct,
}

impl DiagKey {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumPaths => "num_paths",
            Self::NumSteps => "num_steps",
            Self::TreeSteps => "tree_steps",
            Self::UpProbability => "up_probability",
            Self::MeanExerciseTime => "mean_exercise_time",
            Self::EarlyExercisePct => "early_exercise_pct",
        }
    }
}

impl std::str::FromStr for DiagKey {
    type Err = ();

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "num_paths" => Ok(Self::NumPaths),
            "num_steps" => Ok(Self::NumSteps),
            "tree_steps" => Ok(Self::TreeSteps),
            "up_probability" => Ok(Self::UpProbability),
            "mean_exercise_time" => Ok(Self::MeanExerciseTime),
            "early_exercise_pct" => Ok(Self::EarlyExercisePct),
            _ => Err(()),
        }
    }
}

/// Inline diagnostics storage used in [`PricingResult`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: [Option<(DiagKey, f64)>; Self::CAPACITY],
}

impl Diagnostics {
    pub const CAPACITY: usize = 6;

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries[0].is_none()
    }

    /// Inserts or replaces a value, returning the previous one if present.
    #[inline]
    pub fn insert(&mut self, key: DiagKey, value: f64) -> Option<f64> {
        for (entry_key, existing) in self.entries.iter_mut().flatten() {
            if *entry_key == key {
                let prev = *existing;
                *existing = value;
                return Some(prev);
            }
        }

        for entry in &mut self.entries {
            if entry.is_none() {
                *entry = Some((key, value));
                return None;
            }
        }

        panic!("diagnostics capacity exceeded ({})", Self::CAPACITY);
    }

    #[inline]
    pub fn get_key(&self, key: DiagKey) -> Option<&f64> {
        self.entries
            .iter()
            .filter_map(Option::as_ref)
            .find_map(|(entry_key, value)| (*entry_key == key).then_some(value))
    }

    /// String-keyed lookup for bindings and tests.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&f64> {
        let key: DiagKey = key.parse().ok()?;
        self.get_key(key)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &f64)> {
        self.entries
            .iter()
            .filter_map(Option::as_ref)
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Unified engine result payload.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Standard error of the discounted estimator (Monte Carlo engines only).
    pub stderr: Option<f64>,
    /// Engine-specific scalar diagnostics.
    pub diagnostics: Diagnostics,
}

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Inputs violate their domain constraints.
    InvalidParameter(String),
    /// Derived model quantities fall outside their admissible range.
    InconsistentModel(String),
    /// NaN/Inf in accumulators or another numerical failure mid-computation.
    NumericError(String),
    /// A model/engine combination that is reserved but not yet present.
    NotImplemented(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::InconsistentModel(msg) => write!(f, "inconsistent model: {msg}"),
            Self::NumericError(msg) => write!(f, "numeric error: {msg}"),
            Self::NotImplemented(msg) => write!(f, "not implemented: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}
