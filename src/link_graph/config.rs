use crate::error::{RankError, Result};

/// Default weight of incoming rank versus the base value
pub const DEFAULT_DAMPING_FACTOR: f64 = 0.85;
/// Default relative-change cutoff, 0.01%
pub const DEFAULT_RANK_THRESHOLD: f64 = 0.0001;
/// Default upper bound on nodes processed by one propagation
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Constants the link graph ranks with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankConfig {
    pub damping_factor: f64,
    pub rank_threshold: f64,
    pub max_steps: usize,
}

impl RankConfig {
    pub fn new() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING_FACTOR,
            rank_threshold: DEFAULT_RANK_THRESHOLD,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn with_rank_threshold(mut self, rank_threshold: f64) -> Self {
        self.rank_threshold = rank_threshold;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(RankError::InvalidConfig(format!(
                "damping_factor must be in (0, 1), got {}",
                self.damping_factor
            )));
        }
        if !(self.rank_threshold.is_finite() && self.rank_threshold > 0.0) {
            return Err(RankError::InvalidConfig(format!(
                "rank_threshold must be a positive number, got {}",
                self.rank_threshold
            )));
        }
        if self.max_steps == 0 {
            return Err(RankError::InvalidConfig(
                "max_steps must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self::new()
    }
}
