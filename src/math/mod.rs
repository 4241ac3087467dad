//! Numerical primitives: normal distribution helpers and the seeded RNG.

pub mod norm;
pub mod rng;

pub use norm::{acklam_inv_cdf, normal_cdf, normal_pdf, MathError};
pub use rng::{box_muller, generate_normal_samples, generate_stratified_normals, Mt19937_64};

use crate::core::PricingError;

impl From<MathError> for PricingError {
    fn from(err: MathError) -> Self {
        PricingError::NumericError(err.to_string())
    }
}
