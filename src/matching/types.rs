//! Index-level pairs and matchings.

use crate::error::{PairError, Result};
use crate::geometry::DistanceMatrix;
use std::hash::{Hash, Hasher};

/// Two point indices paired together, or the leftover point of an odd set.
///
/// Equality and hashing ignore the order within a couple, so
/// `Pair::Couple(0, 3) == Pair::Couple(3, 0)`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Pair {
    Couple(usize, usize),
    Single(usize),
}

impl Pair {
    /// Order-normalized form used for comparisons.
    fn key(&self) -> (usize, Option<usize>) {
        match *self {
            Pair::Couple(a, b) => (a.min(b), Some(a.max(b))),
            Pair::Single(a) => (a, None),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Pair::Single(_))
    }

    /// Indices contained in this pair.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (a, b) = match *self {
            Pair::Couple(a, b) => (a, Some(b)),
            Pair::Single(a) => (a, None),
        };
        std::iter::once(a).chain(b)
    }

    /// Distance between the two points; zero for a singleton.
    pub fn distance(&self, matrix: &DistanceMatrix) -> f64 {
        match *self {
            Pair::Couple(a, b) => matrix.get(a, b),
            Pair::Single(_) => 0.0,
        }
    }
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pair {}

impl Hash for Pair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A partition of the point indices into pairs (plus at most one singleton).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matching {
    pairs: Vec<Pair>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(n.div_ceil(2)),
        }
    }

    pub fn from_pairs(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    pub fn push(&mut self, pair: Pair) {
        self.pairs.push(pair);
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Mutable access to the pair slots, for partner reassignment in place.
    pub fn pairs_mut(&mut self) -> &mut [Pair] {
        &mut self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    /// The leftover index of an odd matching, if any.
    pub fn singleton(&self) -> Option<usize> {
        self.pairs.iter().find_map(|p| match *p {
            Pair::Single(a) => Some(a),
            Pair::Couple(..) => None,
        })
    }

    /// Sum of pair distances.
    pub fn total_distance(&self, matrix: &DistanceMatrix) -> f64 {
        self.pairs.iter().map(|p| p.distance(matrix)).sum()
    }

    /// Compares pair membership regardless of pair or element order.
    pub fn same_pairs(&self, other: &Matching) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.keys();
        let mut b = other.keys();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    fn keys(&self) -> Vec<(usize, Option<usize>)> {
        self.pairs.iter().map(Pair::key).collect()
    }

    /// Checks that the matching partitions `0..n`.
    ///
    /// Every index must appear exactly once, couples must join distinct
    /// indices, and at most one singleton is allowed (none for even `n`).
    pub fn validate(&self, n: usize) -> Result<()> {
        let mut seen = vec![false; n];
        let mut singles = 0usize;
        for pair in &self.pairs {
            if let Pair::Couple(a, b) = *pair {
                if a == b {
                    return Err(PairError::invalid_matching(format!(
                        "index {a} is paired with itself"
                    )));
                }
            } else {
                singles += 1;
            }
            for i in pair.indices() {
                if i >= n {
                    return Err(PairError::invalid_matching(format!(
                        "index {i} out of range for {n} points"
                    )));
                }
                if seen[i] {
                    return Err(PairError::invalid_matching(format!(
                        "index {i} appears more than once"
                    )));
                }
                seen[i] = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(PairError::invalid_matching(format!(
                "index {missing} is not matched"
            )));
        }
        if singles != n % 2 {
            return Err(PairError::invalid_matching(format!(
                "expected {} singleton(s) for {n} points, found {singles}",
                n % 2
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Matching {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl FromIterator<Pair> for Matching {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Pairs indices in slice order: `(order[0], order[1]), (order[2], order[3]), ...`.
///
/// An odd trailing index becomes a singleton.
pub fn pair_in_order(order: &[usize]) -> Matching {
    order
        .chunks(2)
        .map(|chunk| match *chunk {
            [a, b] => Pair::Couple(a, b),
            [a] => Pair::Single(a),
            _ => unreachable!("chunks(2) yields one or two items"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_order_independent_eq() {
        assert_eq!(Pair::Couple(1, 2), Pair::Couple(2, 1));
        assert_ne!(Pair::Couple(1, 2), Pair::Couple(1, 3));
        assert_ne!(Pair::Single(1), Pair::Couple(1, 1));

        let set: HashSet<Pair> = [Pair::Couple(4, 3), Pair::Couple(3, 4)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_pairs() {
        let a = Matching::from_pairs(vec![Pair::Couple(1, 2), Pair::Couple(3, 4)]);
        let b = Matching::from_pairs(vec![Pair::Couple(4, 3), Pair::Couple(2, 1)]);
        let c = Matching::from_pairs(vec![Pair::Couple(4, 2), Pair::Couple(3, 1)]);
        assert!(a.same_pairs(&b));
        assert!(!a.same_pairs(&c));
    }

    #[test]
    fn test_validate_ok() {
        assert!(Matching::new().validate(0).is_ok());
        assert!(Matching::from_pairs(vec![Pair::Single(0)]).validate(1).is_ok());
        let m = Matching::from_pairs(vec![Pair::Couple(2, 0), Pair::Single(1)]);
        assert!(m.validate(3).is_ok());
    }

    #[test]
    fn test_validate_failures() {
        let duplicate = Matching::from_pairs(vec![Pair::Couple(0, 1), Pair::Couple(1, 2)]);
        assert!(duplicate.validate(4).is_err());

        let missing = Matching::from_pairs(vec![Pair::Couple(0, 1)]);
        assert!(missing.validate(4).is_err());

        let self_pair = Matching::from_pairs(vec![Pair::Couple(0, 0), Pair::Couple(1, 2)]);
        assert!(self_pair.validate(3).is_err());

        let extra_single = Matching::from_pairs(vec![Pair::Single(0), Pair::Single(1)]);
        assert!(extra_single.validate(2).is_err());

        let out_of_range = Matching::from_pairs(vec![Pair::Couple(0, 5)]);
        assert!(out_of_range.validate(2).is_err());
    }

    #[test]
    fn test_pair_in_order() {
        let m = pair_in_order(&[3, 1, 0, 2, 4]);
        assert_eq!(
            m.pairs(),
            &[Pair::Couple(3, 1), Pair::Couple(0, 2), Pair::Single(4)]
        );
        assert_eq!(m.singleton(), Some(4));
    }

    #[test]
    fn test_total_distance_ignores_singleton() {
        let matrix = DistanceMatrix::from_points(&[[0.0], [2.0], [7.0]]).unwrap();
        let m = Matching::from_pairs(vec![Pair::Couple(0, 1), Pair::Single(2)]);
        assert!((m.total_distance(&matrix) - 2.0).abs() < 1e-12);
    }
}
