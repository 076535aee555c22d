//! Distance primitives.
//!
//! Euclidean distance between D-dimensional points, the pairwise distance
//! matrix, and the centroid helper used by the centroid greedy policy.

mod distance;
mod matrix;

pub use distance::{centroid, check_points, distance, squared_distance};
pub use matrix::{distance_matrix, DistanceMatrix, LiveMatrix};
