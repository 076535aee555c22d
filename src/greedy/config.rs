//! Greedy edge-selection policies.

use crate::error::PairError;
use std::fmt;
use std::str::FromStr;

/// How the greedy matcher chooses the next pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GreedyPolicy {
    /// Globally smallest remaining distance.
    #[default]
    ClosestPair,

    /// Point farthest from the centroid of the remaining points, paired
    /// with its nearest remaining neighbour.
    ///
    /// The centroid is recomputed after every pairing.
    Centroid,
}

impl GreedyPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            GreedyPolicy::ClosestPair => "closest-pair",
            GreedyPolicy::Centroid => "centroid",
        }
    }
}

impl fmt::Display for GreedyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GreedyPolicy {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closest-pair" | "closest" | "greedy" => Ok(GreedyPolicy::ClosestPair),
            "centroid" | "COM" | "com" => Ok(GreedyPolicy::Centroid),
            other => Err(PairError::UnknownMethod(other.to_string())),
        }
    }
}
