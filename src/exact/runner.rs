//! Exhaustive search over all perfect matchings.
//!
//! # Algorithm
//!
//! 1. Take the smallest index still available
//! 2. Branch over every candidate pair joining it to another available index
//!    (for odd N, also branch on leaving it as the singleton)
//! 3. Recurse until no index is left, keeping the cheapest complete matching
//!
//! Availability is a `u64` bitmask. The branch order makes the first
//! minimum encountered deterministic for a fixed input order.

use super::config::{ExactConfig, MAX_EXACT_POINTS};
use crate::error::{PairError, Result};
use crate::geometry::DistanceMatrix;
use crate::matching::{Matching, Pair};

/// Result of an exact search.
#[derive(Debug, Clone)]
pub struct ExactResult {
    /// The minimum-distance matching.
    pub matching: Matching,

    /// Its total distance.
    pub total_distance: f64,

    /// Number of complete matchings evaluated (pruned branches excluded).
    pub explored: usize,
}

/// Exact minimum-weight matcher.
pub struct ExactMatcher;

impl ExactMatcher {
    /// Finds the optimal matching for the points behind `matrix`.
    ///
    /// Fails with [`PairError::TooManyPoints`] when the matrix exceeds
    /// `config.max_points`.
    pub fn run(matrix: &DistanceMatrix, config: &ExactConfig) -> Result<ExactResult> {
        config.validate()?;
        let n = matrix.len();
        if n > config.max_points {
            return Err(PairError::TooManyPoints {
                n,
                max: config.max_points,
            });
        }
        log::debug!("exact search over {n} points");

        let result = if config.parallel {
            search_parallel(matrix)
        } else {
            let mut search = Search::new(matrix);
            search.descend(full_mask(n), 0.0, false);
            search.finish()
        };

        log::debug!(
            "exact search done: total {:.6}, {} matchings explored",
            result.total_distance,
            result.explored
        );
        Ok(result)
    }
}

/// All 2-combinations `(i, j)` with `i < j < n`, in lexicographic order.
pub fn candidate_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect()
}

/// Visits every distinct matching of `n` indices, without pruning.
///
/// Even `n` yields the (n-1)!! perfect matchings; odd `n` yields the n!!
/// matchings with exactly one singleton. Fails with
/// [`PairError::TooManyPoints`] above [`MAX_EXACT_POINTS`].
pub fn for_each_matching<F: FnMut(&[Pair])>(n: usize, mut visit: F) -> Result<()> {
    if n > MAX_EXACT_POINTS {
        return Err(PairError::TooManyPoints {
            n,
            max: MAX_EXACT_POINTS,
        });
    }
    let mut stack = Vec::with_capacity(n.div_ceil(2));
    enumerate(full_mask(n), n % 2 == 1, &mut stack, &mut visit);
    Ok(())
}

/// Number of distinct matchings of `n` indices.
pub fn count_matchings(n: usize) -> Result<usize> {
    let mut count = 0;
    for_each_matching(n, |_| count += 1)?;
    Ok(count)
}

fn enumerate<F: FnMut(&[Pair])>(
    available: u64,
    single_allowed: bool,
    stack: &mut Vec<Pair>,
    visit: &mut F,
) {
    if available == 0 {
        visit(stack);
        return;
    }
    let i = available.trailing_zeros() as usize;
    let rest = available & !(1u64 << i);
    for j in bits(rest) {
        stack.push(Pair::Couple(i, j));
        enumerate(rest & !(1u64 << j), single_allowed, stack, visit);
        stack.pop();
    }
    if single_allowed {
        stack.push(Pair::Single(i));
        enumerate(rest, false, stack, visit);
        stack.pop();
    }
}

fn full_mask(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Set bit positions of `mask`, ascending.
fn bits(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            None
        } else {
            let j = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(j)
        }
    })
}

/// Depth-first branch-and-bound state.
struct Search<'a> {
    matrix: &'a DistanceMatrix,
    odd: bool,
    stack: Vec<Pair>,
    best: Option<(f64, Vec<Pair>)>,
    explored: usize,
}

impl<'a> Search<'a> {
    fn new(matrix: &'a DistanceMatrix) -> Self {
        let n = matrix.len();
        Self {
            matrix,
            odd: n % 2 == 1,
            stack: Vec::with_capacity(n.div_ceil(2)),
            best: None,
            explored: 0,
        }
    }

    fn descend(&mut self, available: u64, partial: f64, single_used: bool) {
        if available == 0 {
            self.explored += 1;
            if self.best.as_ref().is_none_or(|(best, _)| partial < *best) {
                self.best = Some((partial, self.stack.clone()));
            }
            return;
        }
        // distances are non-negative: nothing below can beat the incumbent
        if self.best.as_ref().is_some_and(|(best, _)| partial >= *best) {
            return;
        }

        let i = available.trailing_zeros() as usize;
        let rest = available & !(1u64 << i);
        for j in bits(rest) {
            self.stack.push(Pair::Couple(i, j));
            self.descend(
                rest & !(1u64 << j),
                partial + self.matrix.get(i, j),
                single_used,
            );
            self.stack.pop();
        }
        if self.odd && !single_used {
            self.stack.push(Pair::Single(i));
            self.descend(rest, partial, true);
            self.stack.pop();
        }
    }

    fn finish(self) -> ExactResult {
        let (total_distance, pairs) = self.best.unwrap_or((0.0, Vec::new()));
        ExactResult {
            matching: Matching::from_pairs(pairs),
            total_distance,
            explored: self.explored,
        }
    }
}

#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
/// One independent subtree of the search: the first pair placed for index 0.
fn top_level_branches(n: usize) -> Vec<Pair> {
    let mut branches: Vec<Pair> = candidate_pairs(n)
        .into_iter()
        .take_while(|&(i, _)| i == 0)
        .map(|(i, j)| Pair::Couple(i, j))
        .collect();
    if n % 2 == 1 {
        branches.push(Pair::Single(0));
    }
    branches
}

#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
fn search_branch(matrix: &DistanceMatrix, branch: Pair) -> ExactResult {
    let n = matrix.len();
    let mut search = Search::new(matrix);
    search.stack.push(branch);
    match branch {
        Pair::Couple(i, j) => {
            let available = full_mask(n) & !(1u64 << i) & !(1u64 << j);
            search.descend(available, matrix.get(i, j), false);
        }
        Pair::Single(i) => {
            search.descend(full_mask(n) & !(1u64 << i), 0.0, true);
        }
    }
    search.finish()
}

#[cfg(feature = "parallel")]
fn search_parallel(matrix: &DistanceMatrix) -> ExactResult {
    use rayon::prelude::*;

    if matrix.len() < 2 {
        let mut search = Search::new(matrix);
        search.descend(full_mask(matrix.len()), 0.0, false);
        return search.finish();
    }
    let results: Vec<ExactResult> = top_level_branches(matrix.len())
        .into_par_iter()
        .map(|branch| search_branch(matrix, branch))
        .collect();
    merge_branches(results)
}

#[cfg(not(feature = "parallel"))]
fn search_parallel(matrix: &DistanceMatrix) -> ExactResult {
    let mut search = Search::new(matrix);
    search.descend(full_mask(matrix.len()), 0.0, false);
    search.finish()
}

#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
/// Keeps the cheapest branch result; on ties the earliest branch wins,
/// matching the sequential first-encountered rule.
fn merge_branches(results: Vec<ExactResult>) -> ExactResult {
    let explored = results.iter().map(|r| r.explored).sum();
    let mut best: Option<ExactResult> = None;
    for result in results {
        if best
            .as_ref()
            .is_none_or(|b| result.total_distance < b.total_distance)
        {
            best = Some(result);
        }
    }
    let mut best = best.unwrap_or(ExactResult {
        matching: Matching::new(),
        total_distance: 0.0,
        explored: 0,
    });
    best.explored = explored;
    best
}
