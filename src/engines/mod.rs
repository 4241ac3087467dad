//! Pricing engine implementations.

pub mod binomial;
pub mod lsm;
pub mod monte_carlo;

pub use binomial::BinomialTreeEngine;
pub use lsm::LsmEngine;
pub use monte_carlo::{MonteCarloEngine, MonteCarloInstrument};
