//! Seedable random sources and synthetic point sets.
//!
//! Every stochastic routine in the crate takes an explicit `&mut R: Rng`;
//! [`create_rng`] is the single place where generators are constructed.

use crate::error::{PairError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Generates `n` points uniformly distributed in `[0, 1)^dimension`.
pub fn uniform_points<R: Rng>(n: usize, dimension: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..dimension).map(|_| rng.random::<f64>()).collect())
        .collect()
}

/// Generates `n` points in `[low, high)^dimension`.
pub fn uniform_points_in<R: Rng>(
    n: usize,
    dimension: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| {
            (0..dimension)
                .map(|_| rng.random_range(low..high))
                .collect()
        })
        .collect()
}

/// Seeded uniform points for an even particle count.
///
/// Fails with [`PairError::InvalidInput`] when `n` is odd, so the result is
/// always perfectly matchable.
pub fn even_uniform_points(n: usize, dimension: usize, seed: u64) -> Result<Vec<Vec<f64>>> {
    if n % 2 != 0 {
        return Err(PairError::invalid_input(format!(
            "particle count must be even, got {n}"
        )));
    }
    let mut rng = create_rng(seed);
    Ok(uniform_points(n, dimension, &mut rng))
}
