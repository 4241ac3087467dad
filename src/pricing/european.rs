//! Black-Scholes closed form for European vanillas.
//!
//! Used directly and as the expectation anchor of the control-variate
//! estimator.

use crate::core::OptionType;
use crate::math::normal_cdf;

fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vt = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vt;
    let d2 = d1 - vt;
    (d1, d2)
}

/// Black-Scholes price of a European call or put.
///
/// Degenerate inputs (`t <= 0` or `sigma <= 0`) collapse to the intrinsic
/// value of the deterministic terminal spot.
pub fn black_scholes_price(option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 || sigma <= 0.0 {
        let forward = s * (r * t.max(0.0)).exp();
        let df = (-r * t.max(0.0)).exp();
        return df * option_type.payoff(forward, k);
    }

    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    let df = (-r * t).exp();
    match option_type {
        OptionType::Call => s * normal_cdf(d1) - k * df * normal_cdf(d2),
        OptionType::Put => k * df * normal_cdf(-d2) - s * normal_cdf(-d1),
    }
}
