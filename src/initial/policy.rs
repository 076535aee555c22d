//! Starting-matching policies for the annealer.

use crate::error::PairError;
use crate::geometry::DistanceMatrix;
use crate::matching::{pair_in_order, Matching, Pair};
use crate::random::shuffle;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// How the annealer's starting matching is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum InitialPolicy {
    /// `(0, 1), (2, 3), ...` in input order.
    Sequential,

    /// Shuffled input order, then sequential pairing.
    Random,

    /// First remaining point with its nearest remaining neighbour, repeated.
    #[default]
    GreedyPool,
}

impl InitialPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            InitialPolicy::Sequential => "sequential",
            InitialPolicy::Random => "random",
            InitialPolicy::GreedyPool => "greedy-pool",
        }
    }

    /// Builds a complete matching of the points behind `matrix`.
    ///
    /// Only [`InitialPolicy::Random`] draws from `rng`.
    pub fn build<R: Rng>(&self, matrix: &DistanceMatrix, rng: &mut R) -> Matching {
        let n = matrix.len();
        match self {
            InitialPolicy::Sequential => sequential(n),
            InitialPolicy::Random => random(n, rng),
            InitialPolicy::GreedyPool => greedy_pool(matrix),
        }
    }
}

impl fmt::Display for InitialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitialPolicy {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" | "linear" => Ok(InitialPolicy::Sequential),
            "random" => Ok(InitialPolicy::Random),
            "greedy-pool" | "greedy_pool" | "greedy" => Ok(InitialPolicy::GreedyPool),
            other => Err(PairError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Pairs indices in input order.
pub fn sequential(n: usize) -> Matching {
    let order: Vec<usize> = (0..n).collect();
    pair_in_order(&order)
}

/// Pairs indices in a shuffled order.
pub fn random<R: Rng>(n: usize, rng: &mut R) -> Matching {
    let mut order: Vec<usize> = (0..n).collect();
    shuffle(&mut order, rng);
    pair_in_order(&order)
}

/// Takes the first point of a shrinking pool and pairs it with its nearest
/// pool member (first minimum), until the pool is exhausted. O(N²).
pub fn greedy_pool(matrix: &DistanceMatrix) -> Matching {
    let mut pool: Vec<usize> = (0..matrix.len()).collect();
    let mut matching = Matching::with_capacity(pool.len());

    while pool.len() >= 2 {
        let head = pool[0];
        let mut best = 1;
        let mut best_distance = matrix.get(head, pool[1]);
        for (k, &candidate) in pool.iter().enumerate().skip(2) {
            let d = matrix.get(head, candidate);
            if d < best_distance {
                best_distance = d;
                best = k;
            }
        }
        matching.push(Pair::Couple(head, pool[best]));
        pool.remove(best);
        pool.remove(0);
    }
    if let Some(&last) = pool.first() {
        matching.push(Pair::Single(last));
    }
    matching
}
