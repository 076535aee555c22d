//! Error type shared by every matcher.

use thiserror::Error;

/// Errors returned by the pairing algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PairError {
    /// The input could not be traversed as a sequence of points.
    #[error("points are not iterable: {0}")]
    NotIterable(String),

    /// Two points with different coordinate counts were compared.
    #[error("dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Structurally valid but unusable input (empty or non-finite coordinates).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown method '{0}' (expected enumerate, greedy, centroid or simulated-annealing)")]
    UnknownMethod(String),

    #[error("unknown initial policy '{0}' (expected sequential, random or greedy-pool)")]
    UnknownPolicy(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Exhaustive enumeration was requested for more points than allowed.
    #[error("exact matching of {n} points exceeds the limit of {max}")]
    TooManyPoints { n: usize, max: usize },

    /// A matching failed the partition check.
    #[error("invalid matching: {0}")]
    InvalidMatching(String),
}

impl PairError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn invalid_matching(message: impl Into<String>) -> Self {
        Self::InvalidMatching(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PairError>;
