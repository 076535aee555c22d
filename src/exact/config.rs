//! Exact matcher configuration.

use crate::error::{PairError, Result};

/// Largest point count the bitmask search can represent.
pub const MAX_EXACT_POINTS: usize = 64;

/// Configuration for exhaustive enumeration.
///
/// # Examples
///
/// ```
/// use u_pairing::exact::ExactConfig;
///
/// let config = ExactConfig::default().with_max_points(10);
/// assert_eq!(config.max_points, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExactConfig {
    /// Inputs with more points than this are rejected.
    ///
    /// The search visits up to (N-1)!! matchings; 12 points is already
    /// 10 395 of them, 16 points over two million.
    pub max_points: usize,

    /// Search top-level branches on the rayon pool.
    ///
    /// Only honoured with the `parallel` feature. The selected matching is
    /// identical to the sequential search.
    pub parallel: bool,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            max_points: 12,
            parallel: false,
        }
    }
}

impl ExactConfig {
    pub fn with_max_points(mut self, n: usize) -> Self {
        self.max_points = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_points > MAX_EXACT_POINTS {
            return Err(PairError::invalid_config(format!(
                "max_points must be at most {MAX_EXACT_POINTS}, got {}",
                self.max_points
            )));
        }
        Ok(())
    }
}
