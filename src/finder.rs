//! `find_best_pairs`: the single entry point over every matcher.
//!
//! A caller picks a [`Method`] (or names it); the finder validates the
//! points, builds the distance matrix once, dispatches, and converts the
//! resulting index matching back into coordinates.

use crate::error::{PairError, Result};
use crate::exact::{ExactConfig, ExactMatcher};
use crate::geometry::{check_points, DistanceMatrix};
use crate::greedy::{GreedyMatcher, GreedyPolicy};
use crate::matching::{Matching, Pair};
use crate::random::rng_from_option;
use crate::sa::{AnnealConfig, AnnealRunner, AnnealStats};
use std::fmt;
use std::str::FromStr;

/// Matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Method {
    /// Exhaustive search; optimal, small N only.
    Enumerate,
    /// Closest-pair greedy pass.
    Greedy,
    /// Farthest-from-centroid greedy pass.
    Centroid,
    /// Initial builder followed by annealing.
    SimulatedAnnealing,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Enumerate,
        Method::Greedy,
        Method::Centroid,
        Method::SimulatedAnnealing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Enumerate => "enumerate",
            Method::Greedy => "greedy",
            Method::Centroid => "centroid",
            Method::SimulatedAnnealing => "simulated-annealing",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enumerate" => Ok(Method::Enumerate),
            "greedy" => Ok(Method::Greedy),
            "centroid" | "COM" | "com" => Ok(Method::Centroid),
            "simulated-annealing" | "simulated_annealing" => Ok(Method::SimulatedAnnealing),
            other => Err(PairError::UnknownMethod(other.to_string())),
        }
    }
}

/// Per-algorithm options for [`find_best_pairs`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinderConfig {
    pub exact: ExactConfig,
    pub anneal: AnnealConfig,
}

impl FinderConfig {
    pub fn with_exact(mut self, exact: ExactConfig) -> Self {
        self.exact = exact;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }
}

/// A pair expressed in the caller's coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PointPair {
    Couple(Vec<f64>, Vec<f64>),
    Single(Vec<f64>),
}

impl PointPair {
    /// Whether this pair holds exactly the points `a` and `b`, in either order.
    pub fn joins(&self, a: &[f64], b: &[f64]) -> bool {
        match self {
            PointPair::Couple(p, q) => (p == a && q == b) || (p == b && q == a),
            PointPair::Single(_) => false,
        }
    }
}

/// Output of [`find_best_pairs`].
#[derive(Debug, Clone)]
pub struct Pairing {
    pub method: Method,

    /// Matching over input indices.
    pub matching: Matching,

    /// The same matching in input coordinates.
    pub pairs: Vec<PointPair>,

    /// Sum of pair distances.
    pub total_distance: f64,

    /// Annealing counters, for [`Method::SimulatedAnnealing`] only.
    pub anneal: Option<AnnealStats>,
}

/// Pairs up `points` so that the summed pair distance is small.
///
/// All points must share the same dimension D ≥ 1. `N = 0` yields an empty
/// matching, `N = 1` a single singleton, both with total distance 0.
///
/// # Examples
///
/// ```
/// use u_pairing::{find_best_pairs, FinderConfig, Method};
///
/// let points = [[20.0, 2.0], [2.0, 3.0], [1.0, 20.0], [22.0, 3.0]];
/// let pairing = find_best_pairs(&points, Method::Centroid, &FinderConfig::default()).unwrap();
/// assert_eq!(pairing.pairs.len(), 2);
/// assert!(pairing.pairs.iter().any(|p| p.joins(&[1.0, 20.0], &[2.0, 3.0])));
/// ```
pub fn find_best_pairs<P: AsRef<[f64]>>(
    points: &[P],
    method: Method,
    config: &FinderConfig,
) -> Result<Pairing> {
    let n = points.len();
    let dimension = check_points(points)?;
    log::debug!("find_best_pairs: {n} points in {dimension}D via {method}");

    let matrix = DistanceMatrix::from_points(points)?;
    let (matching, total_distance, anneal) = match method {
        Method::Enumerate => {
            let result = ExactMatcher::run(&matrix, &config.exact)?;
            (result.matching, result.total_distance, None)
        }
        Method::Greedy => {
            let result = GreedyMatcher::run(points, &matrix, GreedyPolicy::ClosestPair)?;
            (result.matching, result.total_distance, None)
        }
        Method::Centroid => {
            let result = GreedyMatcher::run(points, &matrix, GreedyPolicy::Centroid)?;
            (result.matching, result.total_distance, None)
        }
        Method::SimulatedAnnealing => {
            let mut rng = rng_from_option(config.anneal.seed);
            let result = AnnealRunner::run(&matrix, &config.anneal, &mut rng)?;
            (result.matching, result.total_distance, Some(result.stats))
        }
    };

    let pairs = to_coordinates(points, &matching);
    Ok(Pairing {
        method,
        matching,
        pairs,
        total_distance,
        anneal,
    })
}

/// [`find_best_pairs`] with the method given by name.
///
/// Fails with [`PairError::UnknownMethod`] for an unrecognized name.
pub fn find_best_pairs_by_name<P: AsRef<[f64]>>(
    points: &[P],
    method: &str,
    config: &FinderConfig,
) -> Result<Pairing> {
    let method: Method = method.parse()?;
    find_best_pairs(points, method, config)
}

/// 1-D convenience: each scalar is a one-coordinate point.
pub fn find_best_pairs_1d(values: &[f64], method: Method, config: &FinderConfig) -> Result<Pairing> {
    let points: Vec<[f64; 1]> = values.iter().map(|&x| [x]).collect();
    find_best_pairs(&points, method, config)
}

fn to_coordinates<P: AsRef<[f64]>>(points: &[P], matching: &Matching) -> Vec<PointPair> {
    matching
        .iter()
        .map(|pair| match *pair {
            Pair::Couple(a, b) => {
                PointPair::Couple(points[a].as_ref().to_vec(), points[b].as_ref().to_vec())
            }
            Pair::Single(a) => PointPair::Single(points[a].as_ref().to_vec()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;
    use crate::initial::InitialPolicy;
    use crate::random::{create_rng, even_uniform_points, uniform_points_in};
    use proptest::prelude::*;

    fn config() -> FinderConfig {
        FinderConfig::default().with_anneal(
            AnnealConfig::default()
                .with_steps_per_stage(50)
                .with_seed(42),
        )
    }

    fn recompute(pairs: &[PointPair]) -> f64 {
        pairs
            .iter()
            .map(|p| match p {
                PointPair::Couple(a, b) => distance(a, b).unwrap(),
                PointPair::Single(_) => 0.0,
            })
            .sum()
    }

    #[test]
    fn test_method_names() {
        for method in Method::ALL {
            assert_eq!(method.name().parse::<Method>().unwrap(), method);
        }
        assert_eq!("COM".parse::<Method>().unwrap(), Method::Centroid);
        assert_eq!(
            "simulated_annealing".parse::<Method>().unwrap(),
            Method::SimulatedAnnealing
        );
    }

    #[test]
    fn test_unknown_method_fails() {
        let err = find_best_pairs_by_name(&[[0.0], [1.0]], "graph", &config()).unwrap_err();
        assert_eq!(err, PairError::UnknownMethod("graph".into()));
    }

    #[test]
    fn test_centroid_scenario() {
        let points = [[20.0, 2.0], [2.0, 3.0], [1.0, 20.0], [22.0, 3.0]];
        let pairing = find_best_pairs(&points, Method::Centroid, &config()).unwrap();
        assert_eq!(pairing.pairs.len(), 2);
        assert!(pairing.pairs.iter().any(|p| p.joins(&[1.0, 20.0], &[2.0, 3.0])));
        assert!(pairing.pairs.iter().any(|p| p.joins(&[20.0, 2.0], &[22.0, 3.0])));
    }

    #[test]
    fn test_one_dimension_scenario_all_methods() {
        for method in Method::ALL {
            let pairing = find_best_pairs_1d(&[20.0, 2.0, 1.0, 22.0], method, &config()).unwrap();
            assert!(pairing.pairs.iter().any(|p| p.joins(&[1.0], &[2.0])), "{method}");
            assert!(pairing.pairs.iter().any(|p| p.joins(&[20.0], &[22.0])), "{method}");
            assert!((pairing.total_distance - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_four_particles_two_dimensions() {
        let points = [[0.0, 0.0], [1.0, 1.0], [20.0, 20.0], [21.0, 21.0]];
        for method in Method::ALL {
            let pairing = find_best_pairs(&points, method, &config()).unwrap();
            assert!(pairing.pairs.iter().any(|p| p.joins(&[0.0, 0.0], &[1.0, 1.0])));
            assert!(pairing.pairs.iter().any(|p| p.joins(&[20.0, 20.0], &[21.0, 21.0])));
        }
    }

    #[test]
    fn test_two_particles() {
        let points = [[0.0, -1.0], [1.0, 2.0]];
        let pairing = find_best_pairs(&points, Method::Enumerate, &config()).unwrap();
        assert_eq!(
            pairing.pairs,
            vec![PointPair::Couple(vec![0.0, -1.0], vec![1.0, 2.0])]
        );
        assert!((pairing.total_distance - 10.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_all_methods() {
        let empty: Vec<Vec<f64>> = Vec::new();
        for method in Method::ALL {
            let pairing = find_best_pairs(&empty, method, &config()).unwrap();
            assert!(pairing.pairs.is_empty());
            assert_eq!(pairing.total_distance, 0.0);

            let pairing = find_best_pairs(&[[7.0, 8.0]], method, &config()).unwrap();
            assert_eq!(pairing.pairs, vec![PointPair::Single(vec![7.0, 8.0])]);
            assert_eq!(pairing.total_distance, 0.0);
        }
    }

    #[test]
    fn test_dimension_mismatch_fails() {
        let points = vec![vec![0.0, 0.0], vec![1.0, 1.0, 1.0]];
        for method in Method::ALL {
            assert!(matches!(
                find_best_pairs(&points, method, &config()),
                Err(PairError::DimensionMismatch { expected: 2, found: 3 })
            ));
        }
    }

    #[test]
    fn test_enumerate_rejects_large_input() {
        let points = even_uniform_points(14, 2, 17657).unwrap();
        assert!(matches!(
            find_best_pairs(&points, Method::Enumerate, &config()),
            Err(PairError::TooManyPoints { n: 14, max: 12 })
        ));
    }

    #[test]
    fn test_annealing_reports_stats() {
        let points = even_uniform_points(20, 3, 17657).unwrap();
        let pairing = find_best_pairs(&points, Method::SimulatedAnnealing, &config()).unwrap();
        let stats = pairing.anneal.expect("annealing stats");
        assert_eq!(stats.stages, 100);
        assert_eq!(stats.iterations, 5000);
        assert!(stats.best_distance <= stats.initial_distance);
        assert!(stats.best_distance <= pairing.total_distance + 1e-9);
    }

    #[test]
    fn test_annealing_rejects_oversized_beta_grid() {
        let points = [[0.0], [1.0], [2.0], [3.0]];
        let config = config().with_anneal(AnnealConfig::default().with_beta_range(0.0, 1.0, 1e-12));
        assert!(matches!(
            find_best_pairs(&points, Method::SimulatedAnnealing, &config),
            Err(PairError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_annealing_seed_reproducible() {
        let points = even_uniform_points(16, 2, 5).unwrap();
        let config = config().with_anneal(
            AnnealConfig::default()
                .with_initial(InitialPolicy::Random)
                .with_steps_per_stage(20)
                .with_seed(9),
        );
        let a = find_best_pairs(&points, Method::SimulatedAnnealing, &config).unwrap();
        let b = find_best_pairs(&points, Method::SimulatedAnnealing, &config).unwrap();
        assert_eq!(a.pairs, b.pairs);
    }

    #[test]
    fn test_against_brute_force_three_dimensions() {
        let mut rng = create_rng(42);
        let points = uniform_points_in(4, 3, -100.0, 100.0, &mut rng);
        let exact = find_best_pairs(&points, Method::Enumerate, &config()).unwrap();
        for method in [Method::Greedy, Method::Centroid, Method::SimulatedAnnealing] {
            let pairing = find_best_pairs(&points, method, &config()).unwrap();
            assert!(pairing.total_distance >= exact.total_distance - 1e-9);
        }
        // with four points one swap reaches every matching
        let annealed = find_best_pairs(
            &points,
            Method::SimulatedAnnealing,
            &config().with_anneal(AnnealConfig::default().with_keep_best(true).with_seed(1)),
        )
        .unwrap();
        assert!(annealed.matching.same_pairs(&exact.matching));
    }

    proptest! {
        #[test]
        fn prop_all_methods_partition_and_conserve(seed in any::<u64>(), n in 0usize..=9, dim in 1usize..=3) {
            let mut rng = create_rng(seed);
            let points = uniform_points_in(n, dim, -10.0, 10.0, &mut rng);
            let exact = find_best_pairs(&points, Method::Enumerate, &config()).unwrap();

            for method in Method::ALL {
                let pairing = find_best_pairs(&points, method, &config()).unwrap();
                prop_assert!(pairing.matching.validate(n).is_ok());
                prop_assert_eq!(pairing.pairs.len(), n.div_ceil(2));
                prop_assert!((recompute(&pairing.pairs) - pairing.total_distance).abs() < 1e-6);
                prop_assert!(pairing.total_distance >= exact.total_distance - 1e-9);
            }
        }
    }
}
