//! Random variates for the evolutionary engine.
//!
//! Every randomized operation in the crate takes `&mut impl Rng`, so tests
//! can inject a seeded generator. Engine-owned generators are
//! [`rand_chacha::ChaCha12Rng`]; see [`crate::simulation::Simulation`].

use rand::Rng;
use std::f64::consts::TAU;

/// Draw a uniform variate in `[0, 1)`.
pub fn uniform(rng: &mut impl Rng) -> f64 {
    rng.random()
}

/// Draw a standard-normal variate via the Box-Muller transform.
///
/// `u1` is redrawn while it is exactly zero, since `ln(0)` is undefined and
/// `rng.random::<f64>()` can return 0.
pub fn standard_normal(rng: &mut impl Rng) -> f64 {
    let mut u1: f64 = rng.random();
    while u1 <= 0.0 {
        u1 = rng.random();
    }
    let u2: f64 = rng.random();

    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
