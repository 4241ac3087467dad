//! Seeded pseudo-random generation and transforms to standard normals.
//!
//! The engine draws from a 64-bit Mersenne Twister owned by a single
//! pricing call. Reseeding resets the generator to the exact state implied
//! by the seed, so a pricing call is a pure function of its configuration.

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

use crate::math::norm::{acklam_inv_cdf, MathError};

const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_MASK: u64 = 0x0000_0000_7FFF_FFFF;

/// 64-bit Mersenne Twister (mt19937-64).
#[derive(Clone)]
pub struct Mt19937_64 {
    state: [u64; NN],
    index: usize,
}

impl std::fmt::Debug for Mt19937_64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937_64")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Mt19937_64 {
    /// Initializes the state from a 64-bit seed using the reference
    /// seeding recurrence.
    pub fn new(seed: u64) -> Self {
        let mut state = [0_u64; NN];
        state[0] = seed;
        for i in 1..NN {
            state[i] = 6_364_136_223_846_793_005_u64
                .wrapping_mul(state[i - 1] ^ (state[i - 1] >> 62))
                .wrapping_add(i as u64);
        }
        Self { state, index: NN }
    }

    fn twist(&mut self) {
        for i in 0..NN {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % NN] & LOWER_MASK);
            let mut xa = x >> 1;
            if x & 1 != 0 {
                xa ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + MM) % NN] ^ xa;
        }
        self.index = 0;
    }

    fn next_raw(&mut self) -> u64 {
        if self.index >= NN {
            self.twist();
        }

        let mut x = self.state[self.index];
        self.index += 1;

        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;
        x
    }

    /// 53-bit uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        let x = self.next_raw() >> 11;
        x as f64 * (1.0 / ((1_u64 << 53) as f64))
    }
}

impl RngCore for Mt19937_64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_raw() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_raw()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_raw().to_le_bytes());
        }
        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            let bytes = self.next_raw().to_le_bytes();
            rem.copy_from_slice(&bytes[..rem.len()]);
        }
    }
}

impl SeedableRng for Mt19937_64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Maps `[0, 1)` into the open interval so logarithms and the inverse CDF
/// stay finite.
#[inline]
fn uniform_open01(u: f64) -> f64 {
    u.max(f64::EPSILON).min(1.0 - f64::EPSILON)
}

/// One standard normal via Box-Muller (cosine branch). Consumes exactly
/// two uniforms, so RNG state after `n` draws depends only on the seed
/// and `n`.
#[inline]
pub fn box_muller(rng: &mut Mt19937_64) -> f64 {
    let u1 = uniform_open01(rng.next_f64());
    let u2 = uniform_open01(rng.next_f64());
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// `n` independent standard normals.
pub fn generate_normal_samples(rng: &mut Mt19937_64, n: usize) -> Vec<f64> {
    (0..n).map(|_| box_muller(rng)).collect()
}

/// `n` stratified standard normals: one uniform per stratum of `(0, 1)`,
/// shuffled to break the stratum ordering, then mapped through the
/// inverse CDF. The shuffle draws from the same generator to keep the
/// whole sequence reproducible.
pub fn generate_stratified_normals(
    rng: &mut Mt19937_64,
    n: usize,
) -> Result<Vec<f64>, MathError> {
    let stratum = 1.0 / n as f64;
    let mut uniforms: Vec<f64> = (0..n)
        .map(|i| (i as f64 + rng.next_f64()) * stratum)
        .collect();
    uniforms.shuffle(rng);

    uniforms
        .into_iter()
        .map(|u| acklam_inv_cdf(uniform_open01(u)))
        .collect()
}
