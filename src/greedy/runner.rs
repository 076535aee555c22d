//! Greedy pass over a live distance matrix.
//!
//! Each step picks one pair according to the [`GreedyPolicy`], marks both
//! points dead, and continues on the remainder until zero or one point is
//! left. O(N) steps of O(k²) each, O(N³) overall.

use super::config::GreedyPolicy;
use crate::error::{PairError, Result};
use crate::geometry::{centroid, squared_distance, DistanceMatrix, LiveMatrix};
use crate::matching::{Matching, Pair};

/// Result of a greedy pass.
#[derive(Debug, Clone)]
pub struct GreedyResult {
    pub matching: Matching,
    pub total_distance: f64,
}

/// Greedy graph matcher.
pub struct GreedyMatcher;

impl GreedyMatcher {
    /// Runs the greedy pass for `points` with a precomputed `matrix`.
    ///
    /// `points` supplies coordinates for the centroid policy and must be
    /// the same length as `matrix`.
    pub fn run<P: AsRef<[f64]>>(
        points: &[P],
        matrix: &DistanceMatrix,
        policy: GreedyPolicy,
    ) -> Result<GreedyResult> {
        if points.len() != matrix.len() {
            return Err(PairError::invalid_input(format!(
                "{} points given for a {}x{} matrix",
                points.len(),
                matrix.len(),
                matrix.len()
            )));
        }
        match policy {
            GreedyPolicy::ClosestPair => Self::run_closest(matrix),
            GreedyPolicy::Centroid => drive(matrix, policy, |live| next_centroid(points, live)),
        }
    }

    /// Closest-pair pass that needs no coordinates.
    pub fn run_closest(matrix: &DistanceMatrix) -> Result<GreedyResult> {
        drive(matrix, GreedyPolicy::ClosestPair, |live| Ok(live.closest_pair()))
    }
}

/// Pairs whatever `next` picks until it has nothing left to offer.
fn drive<F>(matrix: &DistanceMatrix, policy: GreedyPolicy, mut next: F) -> Result<GreedyResult>
where
    F: FnMut(&LiveMatrix) -> Result<Option<(usize, usize)>>,
{
    log::debug!("greedy {policy} pass over {} points", matrix.len());
    let mut live = LiveMatrix::new(matrix);
    let mut matching = Matching::with_capacity(matrix.len());
    while let Some((a, b)) = next(&live)? {
        matching.push(Pair::Couple(a, b));
        live.remove(a);
        live.remove(b);
    }
    if let Some(&last) = live.alive_indices().first() {
        matching.push(Pair::Single(last));
    }

    let total_distance = matching.total_distance(matrix);
    log::debug!("greedy {policy} pass done: total {total_distance:.6}");
    Ok(GreedyResult {
        matching,
        total_distance,
    })
}

fn next_centroid<P: AsRef<[f64]>>(
    points: &[P],
    live: &LiveMatrix,
) -> Result<Option<(usize, usize)>> {
    let remaining = live.alive_indices();
    if remaining.len() < 2 {
        return Ok(None);
    }
    let center = centroid(points, &remaining);

    let mut farthest = remaining[0];
    let mut farthest_sq = f64::NEG_INFINITY;
    for &i in &remaining {
        let d = squared_distance(points[i].as_ref(), &center)?;
        if d > farthest_sq {
            farthest_sq = d;
            farthest = i;
        }
    }

    let partner = live
        .nearest(farthest)
        .ok_or_else(|| PairError::invalid_input("no partner left for centroid pairing"))?;
    Ok(Some((farthest, partner)))
}
