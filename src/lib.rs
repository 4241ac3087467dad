//! mcoptions is a Monte Carlo and lattice pricing engine for equity
//! derivatives under geometric Brownian motion: European, Asian, barrier,
//! and lookback payoffs by path simulation, American and Bermudan
//! contracts by binomial backward induction or Longstaff-Schwartz
//! least-squares regression.
//!
//! References used across modules:
//! - Glasserman (2004) for Monte Carlo estimators and variance reduction.
//! - Longstaff and Schwartz (2001) for regression-based early exercise.
//! - Cox, Ross and Rubinstein (1979) and Hull (11th ed.) Ch. 13 for the
//!   recombining lattice.
//! - Acklam's rational approximation for the inverse normal CDF.
//!
//! Numerical considerations:
//! - Every engine is deterministic for a fixed [`core::EngineConfig`]:
//!   the seed fully determines RNG consumption, and antithetic twins are
//!   evaluated with no intervening draws.
//! - Barrier and lookback payoffs monitor the discretely sampled path;
//!   the discretization bias versus continuous monitoring is documented
//!   and not corrected.
//! - Variance-reduction toggles compose: antithetic pairing, a fixed
//!   beta-1 Black-Scholes control variate, stratified terminal draws,
//!   and importance sampling with the likelihood-ratio correction.
//!
//! The pricing kernel is single-threaded, synchronous, and blocking per
//! call; parallelism belongs to the request layer, which gives each
//! worker its own configuration.
//!
//! # Quick Start
//! Price a European call by simulation and compare with the closed form:
//! ```rust
//! use mcoptions::core::EngineConfig;
//! use mcoptions::core::OptionType;
//! use mcoptions::pricing::european::black_scholes_price;
//! use mcoptions::pricing::price_european_call;
//!
//! let mut config = EngineConfig::new();
//! config.set_num_paths(20_000);
//! config.set_num_steps(32);
//!
//! let mc = price_european_call(&config, 100.0, 100.0, 0.05, 0.20, 1.0).unwrap();
//! let bs = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
//! assert!((mc - bs).abs() / bs < 0.05);
//! ```
//!
//! Price an American put on the lattice:
//! ```rust
//! use mcoptions::core::EngineConfig;
//! use mcoptions::pricing::price_american_put_binomial;
//!
//! let config = EngineConfig::new();
//! let px = price_american_put_binomial(&config, 100.0, 100.0, 0.05, 0.20, 1.0, 200).unwrap();
//! assert!(px > 5.5 && px < 7.0);
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod market;
pub mod math;
pub mod mc;
pub mod models;
pub mod pricing;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::{BinomialTreeEngine, LsmEngine, MonteCarloEngine};
    pub use crate::instruments::*;
    pub use crate::market::Market;
    pub use crate::pricing::european::black_scholes_price;
    pub use crate::pricing::facade::*;
}
