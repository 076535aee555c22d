//! Annealing loop over pairwise bond swaps.

use super::config::AnnealConfig;
use crate::error::Result;
use crate::geometry::DistanceMatrix;
use crate::matching::{Matching, Pair};
use rand::Rng;

/// Counters collected during a refinement.
#[derive(Debug, Clone, Default)]
pub struct AnnealStats {
    /// Total distance of the matching handed to the refiner.
    pub initial_distance: f64,

    /// Lowest running total observed.
    pub best_distance: f64,

    /// Number of beta stages executed.
    pub stages: usize,

    /// Total number of swap proposals.
    pub iterations: usize,

    /// Number of accepted proposals (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving proposals.
    pub improving_moves: usize,

    /// Running total at the end of each stage, starting with the initial one.
    pub cost_history: Vec<f64>,
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Final matching (or the best seen, with `keep_best`).
    pub matching: Matching,

    /// Total distance of `matching`.
    pub total_distance: f64,

    pub stats: AnnealStats,
}

/// Executes the simulated annealing refinement.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Builds the starting matching with `config.initial`, then refines it.
    pub fn run<R: Rng>(
        matrix: &DistanceMatrix,
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult> {
        let initial = config.initial.build(matrix, rng);
        Self::run_from(matrix, initial, config, rng)
    }

    /// Refines a caller-supplied starting matching.
    pub fn run_from<R: Rng>(
        matrix: &DistanceMatrix,
        initial: Matching,
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult> {
        initial.validate(matrix.len())?;
        let mut matching = initial;
        let total = matching.total_distance(matrix);
        let stats = Self::refine(matrix, &mut matching, total, config, rng)?;
        let total_distance = if config.keep_best {
            stats.best_distance
        } else {
            *stats.cost_history.last().unwrap_or(&total)
        };
        Ok(AnnealResult {
            matching,
            total_distance,
            stats,
        })
    }

    /// Anneals `matching` in place, starting from its known `total_distance`.
    ///
    /// Only partners are reassigned; the set of pair slots is preserved.
    /// Singletons never take part in a swap, and a matching with fewer than
    /// two couples is left untouched.
    pub fn refine<R: Rng>(
        matrix: &DistanceMatrix,
        matching: &mut Matching,
        total_distance: f64,
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealStats> {
        config.validate()?;

        let mut stats = AnnealStats {
            initial_distance: total_distance,
            best_distance: total_distance,
            cost_history: vec![total_distance],
            ..AnnealStats::default()
        };

        let pool: Vec<usize> = matching
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_single())
            .map(|(slot, _)| slot)
            .collect();
        if pool.len() < 2 {
            log::debug!("annealing skipped: {} swappable pairs", pool.len());
            return Ok(stats);
        }

        log::debug!(
            "annealing {} pairs over {} stages x {} steps, initial total {:.6}",
            pool.len(),
            config.stage_count(),
            config.steps_per_stage,
            total_distance
        );

        let mut total = total_distance;
        let mut best = config.keep_best.then(|| matching.clone());

        for beta in config.betas() {
            let accepted_before = stats.accepted_moves;
            for _ in 0..config.steps_per_stage {
                stats.iterations += 1;
                let Some((x, y, swapped, candidate)) = propose(matrix, matching, &pool, total, rng)
                else {
                    continue;
                };

                // Metropolis acceptance on the inverse temperature
                let accept = if candidate < total {
                    stats.improving_moves += 1;
                    true
                } else {
                    let probability = (beta * (total - candidate)).exp();
                    rng.random::<f64>() < probability
                };

                if accept {
                    let pairs = matching.pairs_mut();
                    pairs[x] = swapped.0;
                    pairs[y] = swapped.1;
                    total = candidate;
                    stats.accepted_moves += 1;

                    if total < stats.best_distance {
                        stats.best_distance = total;
                        if let Some(best) = best.as_mut() {
                            best.clone_from(matching);
                        }
                    }
                }
            }
            stats.stages += 1;
            stats.cost_history.push(total);
            log::trace!(
                "stage {} beta {beta:.4}: total {total:.6}, accepted {}/{}",
                stats.stages,
                stats.accepted_moves - accepted_before,
                config.steps_per_stage
            );
        }

        if let Some(best) = best {
            *matching = best;
        }

        log::debug!(
            "annealing done: total {:.6} (best {:.6}), {} of {} moves accepted",
            total,
            stats.best_distance,
            stats.accepted_moves,
            stats.iterations
        );
        Ok(stats)
    }
}

/// Draws two distinct couple slots and returns the better of the two
/// alternative re-pairings with its candidate total.
fn propose<R: Rng>(
    matrix: &DistanceMatrix,
    matching: &Matching,
    pool: &[usize],
    total: f64,
    rng: &mut R,
) -> Option<(usize, usize, (Pair, Pair), f64)> {
    let m = pool.len();
    let i = rng.random_range(0..m);
    let mut j = rng.random_range(0..m - 1);
    if j >= i {
        j += 1;
    }
    let (x, y) = (pool[i], pool[j]);
    let pairs = matching.pairs();
    let (Pair::Couple(a, b), Pair::Couple(c, d)) = (pairs[x], pairs[y]) else {
        return None;
    };

    let current = matrix.get(a, b) + matrix.get(c, d);
    let cross = matrix.get(a, c) + matrix.get(b, d);
    let split = matrix.get(a, d) + matrix.get(b, c);

    let cross_total = total - current + cross;
    let split_total = total - current + split;
    if split_total < cross_total {
        Some((x, y, (Pair::Couple(a, d), Pair::Couple(b, c)), split_total))
    } else {
        Some((x, y, (Pair::Couple(a, c), Pair::Couple(b, d)), cross_total))
    }
}
