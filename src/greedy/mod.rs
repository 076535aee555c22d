//! Greedy graph matcher.
//!
//! Repeatedly commits to one pair chosen from the live distance matrix and
//! removes both points. Two policies are available: the globally closest
//! pair, and the point farthest from the remaining centroid paired with
//! its nearest neighbour.

mod config;
mod runner;

pub use config::GreedyPolicy;
pub use runner::{GreedyMatcher, GreedyResult};
