//! European reference scenario and determinism guarantees.
//!
//! Reference configuration: seed 12345, 100,000 paths, 252 steps,
//! antithetic pairing on (the library defaults). Closed-form anchors:
//! Black-Scholes call 10.4506, put 5.5735 at S=K=100, r=5%, sigma=20%, T=1.

use mcoptions::core::{EngineConfig, OptionType};
use mcoptions::pricing::european::black_scholes_price;
use mcoptions::pricing::{price_european_call, price_european_put};

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const RATE: f64 = 0.05;
const VOL: f64 = 0.20;
const MATURITY: f64 = 1.0;

#[test]
fn european_call_matches_black_scholes_reference() {
    let config = EngineConfig::new();
    let mc = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    let bs = black_scholes_price(OptionType::Call, SPOT, STRIKE, RATE, VOL, MATURITY);

    assert!((bs - 10.4506).abs() < 2e-4, "closed form sanity: {bs}");
    assert!(
        (mc - bs).abs() < 0.15,
        "MC call {mc} should sit on the closed form {bs}"
    );
}

#[test]
fn european_put_matches_black_scholes_reference() {
    let config = EngineConfig::new();
    let mc = price_european_put(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    let bs = black_scholes_price(OptionType::Put, SPOT, STRIKE, RATE, VOL, MATURITY);

    assert!((bs - 5.5735).abs() < 2e-4, "closed form sanity: {bs}");
    assert!(
        (mc - bs).abs() < 0.12,
        "MC put {mc} should sit on the closed form {bs}"
    );
}

#[test]
fn put_call_parity_holds_within_monte_carlo_error() {
    // Call and put share the seed, hence the same paths: the parity gap
    // reduces to the sampling error of the discounted forward.
    let config = EngineConfig::new();
    let call = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    let put = price_european_put(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();

    let parity = SPOT - STRIKE * (-RATE * MATURITY).exp();
    assert!(
        (call - put - parity).abs() < 0.30,
        "parity violated: C-P={} vs S-K*df={parity}",
        call - put
    );
}

#[test]
fn identical_configurations_are_bit_identical() {
    let config = EngineConfig::new();
    let first = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    let second = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn reseeding_restores_the_original_result() {
    let mut config = EngineConfig::new();
    let original = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();

    config.set_seed(777);
    let other = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    assert_ne!(original.to_bits(), other.to_bits());

    config.set_seed(12_345);
    let restored = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    assert_eq!(original.to_bits(), restored.to_bits());
}

#[test]
fn negative_rates_are_supported() {
    let mut config = EngineConfig::new();
    config.set_num_paths(40_000);
    config.set_num_steps(32);

    let mc = price_european_call(&config, SPOT, STRIKE, -0.01, VOL, MATURITY).unwrap();
    let bs = black_scholes_price(OptionType::Call, SPOT, STRIKE, -0.01, VOL, MATURITY);
    assert!((mc - bs).abs() < 0.25, "mc={mc} bs={bs}");
}
