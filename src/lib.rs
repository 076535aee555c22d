//! Low-total-distance pairing of points in D-dimensional space.
//!
//! Given N points, partition them into disjoint pairs (one singleton when N
//! is odd) so that the sum of Euclidean pair distances is small: minimum
//! weight perfect matching on the complete Euclidean graph.
//!
//! - **Exact**: exhaustive enumeration of every perfect matching. Optimal,
//!   factorial cost, intended for N ≲ 12 and as a correctness oracle.
//! - **Greedy**: repeatedly pairs the globally closest remaining points.
//! - **Centroid**: pairs the point farthest from the remaining centroid
//!   with its nearest neighbour.
//! - **Simulated annealing**: refines a starting matching by swapping the
//!   partners of two random pairs over a sweep of inverse temperatures.
//!
//! # Example
//!
//! ```
//! use u_pairing::{find_best_pairs_by_name, FinderConfig};
//!
//! let points = [[0.0, 0.0], [20.0, 20.0], [1.0, 1.0], [21.0, 21.0]];
//! let pairing = find_best_pairs_by_name(&points, "enumerate", &FinderConfig::default()).unwrap();
//! assert!((pairing.total_distance - 2.0 * 2.0_f64.sqrt()).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-backed exact search
//! - `serde`: `Serialize`/`Deserialize` for configs and results
//! - `wasm`: a `findBestPairs` JavaScript binding

pub mod error;
pub mod exact;
pub mod finder;
pub mod geometry;
pub mod greedy;
pub mod initial;
pub mod matching;
pub mod random;
pub mod sa;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{PairError, Result};
pub use finder::{
    find_best_pairs, find_best_pairs_1d, find_best_pairs_by_name, FinderConfig, Method, Pairing,
    PointPair,
};
pub use matching::{Matching, Pair};
