//! Simulated annealing refiner.
//!
//! Improves a complete matching by repeatedly picking two pairs and
//! re-pairing their four points. Improving swaps are always taken; worse
//! ones are accepted with probability `exp(-beta * delta)`, with beta
//! (inverse temperature) swept over a fixed grid of stages.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;

pub use config::{AnnealConfig, BetaSweep, MAX_STAGES};
pub use runner::{AnnealResult, AnnealRunner, AnnealStats};
