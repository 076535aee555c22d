//! Initial-solution builders.
//!
//! Cheap constructions of a valid matching used to seed the annealer.

mod policy;

pub use policy::{greedy_pool, random, sequential, InitialPolicy};
