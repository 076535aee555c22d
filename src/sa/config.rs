//! Annealing configuration and the beta schedule.

use crate::error::{PairError, Result};
use crate::initial::InitialPolicy;

/// Upper bound on the number of beta stages in one schedule.
pub const MAX_STAGES: usize = 1_000_000;

/// Direction in which the inverse temperature is swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BetaSweep {
    /// `beta_min` up to `beta_max`: hot to cold (standard cooling).
    #[default]
    Ascending,

    /// `beta_max` down to `beta_min`: cold to hot.
    Descending,
}

/// Configuration for the annealing refiner.
///
/// Beta is the inverse temperature: a non-improving swap that raises the
/// total by `delta` is accepted with probability `exp(-beta * delta)`.
///
/// # Examples
///
/// ```
/// use u_pairing::initial::InitialPolicy;
/// use u_pairing::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_steps_per_stage(200)
///     .with_beta_range(0.5, 50.0, 0.5)
///     .with_initial(InitialPolicy::Random)
///     .with_seed(42);
/// assert_eq!(config.stage_count(), 100);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealConfig {
    /// Swap proposals at each beta value.
    pub steps_per_stage: usize,

    /// Smallest inverse temperature (hottest stage).
    pub beta_min: f64,

    /// Largest inverse temperature (coldest stage).
    pub beta_max: f64,

    /// Increment between consecutive stages.
    pub beta_step: f64,

    pub sweep: BetaSweep,

    /// How the starting matching is built.
    pub initial: InitialPolicy,

    /// Return the best matching seen instead of the final one.
    pub keep_best: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            steps_per_stage: 100,
            beta_min: 1.0,
            beta_max: 100.0,
            beta_step: 1.0,
            sweep: BetaSweep::default(),
            initial: InitialPolicy::default(),
            keep_best: false,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_steps_per_stage(mut self, n: usize) -> Self {
        self.steps_per_stage = n;
        self
    }

    /// Sets `beta_min`, `beta_max` and `beta_step` together.
    pub fn with_beta_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.beta_min = min;
        self.beta_max = max;
        self.beta_step = step;
        self
    }

    pub fn with_sweep(mut self, sweep: BetaSweep) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_initial(mut self, initial: InitialPolicy) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_keep_best(mut self, keep_best: bool) -> Self {
        self.keep_best = keep_best;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of beta values on the grid `beta_min, beta_min + step, ..., <= beta_max`.
    ///
    /// Zero for a schedule that fails [`validate`](Self::validate), including
    /// grids wider than [`MAX_STAGES`].
    pub fn stage_count(&self) -> usize {
        self.checked_stage_count().unwrap_or(0)
    }

    fn checked_stage_count(&self) -> Option<usize> {
        if self.beta_step <= 0.0 || self.beta_max < self.beta_min {
            return None;
        }
        // tolerance keeps beta_max on the grid despite rounding
        let steps = ((self.beta_max - self.beta_min) / self.beta_step + 1e-9).floor();
        // NaN bounds or step end up here as a non-finite count
        if !steps.is_finite() || steps >= MAX_STAGES as f64 {
            return None;
        }
        (steps as usize).checked_add(1)
    }

    /// Beta value of every stage, in sweep order.
    pub fn betas(&self) -> impl Iterator<Item = f64> + '_ {
        let count = self.stage_count();
        let descending = self.sweep == BetaSweep::Descending;
        (0..count).map(move |k| {
            let k = if descending { count - 1 - k } else { k };
            self.beta_min + k as f64 * self.beta_step
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.steps_per_stage == 0 {
            return Err(PairError::invalid_config("steps_per_stage must be at least 1"));
        }
        if !self.beta_min.is_finite() || self.beta_min < 0.0 {
            return Err(PairError::invalid_config(format!(
                "beta_min must be finite and non-negative, got {}",
                self.beta_min
            )));
        }
        if !self.beta_max.is_finite() || self.beta_max < self.beta_min {
            return Err(PairError::invalid_config(format!(
                "beta_max must be finite and >= beta_min, got {}",
                self.beta_max
            )));
        }
        if !self.beta_step.is_finite() || self.beta_step <= 0.0 {
            return Err(PairError::invalid_config(format!(
                "beta_step must be positive, got {}",
                self.beta_step
            )));
        }
        if self.checked_stage_count().is_none() {
            return Err(PairError::invalid_config(format!(
                "beta grid {}..={} by {} exceeds {MAX_STAGES} stages",
                self.beta_min, self.beta_max, self.beta_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert_eq!(config.steps_per_stage, 100);
        assert_eq!(config.stage_count(), 100);
        assert_eq!(config.initial, InitialPolicy::GreedyPool);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_betas_inclusive_grid() {
        let config = AnnealConfig::default().with_beta_range(0.1, 1.0, 0.1);
        let betas: Vec<f64> = config.betas().collect();
        assert_eq!(betas.len(), 10);
        assert!((betas[0] - 0.1).abs() < 1e-12);
        assert!((betas[9] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_betas_off_grid_max() {
        let config = AnnealConfig::default().with_beta_range(1.0, 2.5, 1.0);
        assert_eq!(config.betas().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_betas_descending() {
        let config = AnnealConfig::default()
            .with_beta_range(1.0, 3.0, 1.0)
            .with_sweep(BetaSweep::Descending);
        assert_eq!(config.betas().collect::<Vec<_>>(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_single_stage_when_min_equals_max() {
        let config = AnnealConfig::default().with_beta_range(5.0, 5.0, 1.0);
        assert_eq!(config.betas().collect::<Vec<_>>(), vec![5.0]);
    }

    #[test]
    fn test_validate_zero_steps() {
        let config = AnnealConfig::default().with_steps_per_stage(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_betas() {
        assert!(AnnealConfig::default()
            .with_beta_range(-1.0, 1.0, 0.1)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_beta_range(10.0, 1.0, 0.1)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_beta_range(1.0, 10.0, 0.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_beta_range(1.0, f64::INFINITY, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let tiny = AnnealConfig::default().with_beta_range(0.0, 1.0, 1e-300);
        assert!(matches!(tiny.validate(), Err(PairError::InvalidConfig(_))));
        assert_eq!(tiny.stage_count(), 0);
        assert_eq!(tiny.betas().count(), 0);

        let fine = AnnealConfig::default().with_beta_range(0.0, 1.0, 1e-12);
        assert!(fine.validate().is_err());
        assert_eq!(fine.stage_count(), 0);
    }

    #[test]
    fn test_grid_at_stage_limit() {
        let config = AnnealConfig::default().with_beta_range(0.0, (MAX_STAGES - 1) as f64, 1.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.stage_count(), MAX_STAGES);

        let over = AnnealConfig::default().with_beta_range(0.0, MAX_STAGES as f64, 1.0);
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_descending_betas_lazy() {
        let config = AnnealConfig::default()
            .with_beta_range(0.0, 1e5, 1.0)
            .with_sweep(BetaSweep::Descending);
        let head: Vec<f64> = config.betas().take(2).collect();
        assert_eq!(head, vec![1e5, 1e5 - 1.0]);
    }
}
