//! Pairs and matchings over point indices.
//!
//! A [`Matching`] is the central data structure: every algorithm in the
//! crate produces one, and [`Matching::validate`] checks the partition
//! invariant they all preserve.

mod types;

pub use types::{pair_in_order, Matching, Pair};
