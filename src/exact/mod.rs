//! Exact matcher.
//!
//! Exhaustive enumeration of every perfect matching, selecting the one with
//! the smallest total distance. Cost grows as (N-1)!!, so this path serves
//! as ground truth for small inputs and as the oracle the heuristics are
//! tested against.

mod config;
mod runner;

pub use config::{ExactConfig, MAX_EXACT_POINTS};
pub use runner::{candidate_pairs, count_matchings, for_each_matching, ExactMatcher, ExactResult};
