//! Path-dependent payoffs: Asian, barrier, and lookback invariants.

use mcoptions::core::{BarrierVariant, EngineConfig, OptionType, PricingEngine};
use mcoptions::engines::MonteCarloEngine;
use mcoptions::instruments::{LookbackOption, VanillaOption};
use mcoptions::market::Market;
use mcoptions::pricing::{
    price_asian_arithmetic_call, price_barrier_call, price_european_call, price_lookback_call,
    price_lookback_put,
};

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const RATE: f64 = 0.05;
const VOL: f64 = 0.20;
const MATURITY: f64 = 1.0;

#[test]
fn asian_reference_value_with_monthly_averaging() {
    // Monthly discrete sampling prices above the continuous-averaging
    // value (about 5.75 for these parameters) but far below the European
    // 10.45; the discrete geometric lower bound sits near 5.95.
    let config = EngineConfig::new();
    let asian = price_asian_arithmetic_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY, 12).unwrap();
    assert!(
        asian > 5.4 && asian < 6.3,
        "monthly asian call should be near 5.7-6.1, got {asian}"
    );
}

#[test]
fn averaging_cheapens_the_asian_below_the_european() {
    let config = EngineConfig::new();
    let asian = price_asian_arithmetic_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY, 12).unwrap();
    let european = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    assert!(
        asian < european,
        "asian {asian} should be strictly below european {european}"
    );
}

#[test]
fn knock_out_barrier_caps_the_european_value() {
    let config = EngineConfig::new();
    let barrier = price_barrier_call(
        &config,
        SPOT,
        STRIKE,
        RATE,
        VOL,
        MATURITY,
        130.0,
        BarrierVariant::UpAndOut,
        0.0,
    )
    .unwrap();
    let european = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    assert!(
        barrier < european,
        "up-and-out {barrier} should be strictly below european {european}"
    );
}

#[test]
fn knock_in_plus_knock_out_reassembles_the_european() {
    // Same seed, same paths: on every path exactly one of the pair pays
    // the kernel, so the two estimates sum to the European estimate up to
    // floating-point accumulation order.
    let mut config = EngineConfig::new();
    config.set_num_paths(50_000);
    config.set_num_steps(64);

    let out = price_barrier_call(
        &config, SPOT, STRIKE, RATE, VOL, MATURITY, 130.0, BarrierVariant::UpAndOut, 0.0,
    )
    .unwrap();
    let inn = price_barrier_call(
        &config, SPOT, STRIKE, RATE, VOL, MATURITY, 130.0, BarrierVariant::UpAndIn, 0.0,
    )
    .unwrap();
    let european = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();

    assert!(
        (out + inn - european).abs() < 1e-8,
        "in/out parity broken: {out} + {inn} != {european}"
    );
}

#[test]
fn rebate_raises_the_knocked_out_price() {
    let mut config = EngineConfig::new();
    config.set_num_paths(50_000);
    config.set_num_steps(64);

    let no_rebate = price_barrier_call(
        &config, SPOT, STRIKE, RATE, VOL, MATURITY, 120.0, BarrierVariant::UpAndOut, 0.0,
    )
    .unwrap();
    let with_rebate = price_barrier_call(
        &config, SPOT, STRIKE, RATE, VOL, MATURITY, 120.0, BarrierVariant::UpAndOut, 5.0,
    )
    .unwrap();
    assert!(
        with_rebate > no_rebate,
        "rebate should add value: {with_rebate} vs {no_rebate}"
    );
}

#[test]
fn fixed_strike_lookback_dominates_the_european() {
    // The running maximum dominates the terminal spot on every path, so
    // with shared paths the ordering is pathwise, not statistical.
    let mut config = EngineConfig::new();
    config.set_num_paths(50_000);
    config.set_num_steps(64);

    let lookback = price_lookback_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY, true).unwrap();
    let european = price_european_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY).unwrap();
    assert!(
        lookback >= european - 1e-10,
        "fixed lookback {lookback} should dominate european {european}"
    );
    assert!(lookback > european + 1.0, "lookback premium should be material");
}

#[test]
fn floating_strike_lookbacks_are_non_negative_and_reproducible() {
    let mut config = EngineConfig::new();
    config.set_num_paths(30_000);
    config.set_num_steps(64);

    let call = price_lookback_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY, false).unwrap();
    let put = price_lookback_put(&config, SPOT, STRIKE, RATE, VOL, MATURITY, false).unwrap();
    assert!(call > 0.0);
    assert!(put > 0.0);

    let call_again = price_lookback_call(&config, SPOT, STRIKE, RATE, VOL, MATURITY, false).unwrap();
    assert_eq!(call.to_bits(), call_again.to_bits());
}

#[test]
fn lookback_payoff_dominates_terminal_payoff_pathwise() {
    // Engine-level check of the dominance invariant under one shared
    // path bank.
    let market = Market::new(SPOT, RATE, VOL);
    let engine = MonteCarloEngine::new(20_000, 32, 99).with_antithetic(true);

    let lookback = engine
        .price(&LookbackOption::new(OptionType::Put, STRIKE, MATURITY, true), &market)
        .unwrap()
        .price;
    let european = engine
        .price(&VanillaOption::european_put(STRIKE, MATURITY), &market)
        .unwrap()
        .price;
    assert!(lookback >= european - 1e-10);
}
