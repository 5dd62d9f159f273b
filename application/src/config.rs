//! Swarm run configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;
use verdict_domain::ConvergenceDetector;

/// Errors from validating a [`SwarmConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_rounds must be at least 1")]
    ZeroRounds,

    #[error("committee_size must be at least 1")]
    ZeroCommittee,

    #[error("temperature must be within [0.0, 2.0], got {0}")]
    TemperatureOutOfRange(f64),

    #[error("convergence_threshold must be positive, got {0}")]
    NonPositiveThreshold(f64),

    #[error("convergence_patience must be at least 1")]
    ZeroPatience,
}

/// Tunable parameters for one swarm run
///
/// The defaults match the intended production profile: up to 10 rounds of 3
/// judges, stopping early once consecutive snapshots diverge by less than
/// 0.01 bits for 2 rounds running, with at least 6 ballots accumulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Maximum number of polling rounds
    pub num_rounds: u32,
    /// Judges per round
    pub committee_size: usize,
    /// Sampling temperature passed to backends
    pub temperature: f64,
    /// KL divergence bound, in bits, below which a round counts as stable
    pub convergence_threshold: f64,
    /// Consecutive stable rounds required before stopping
    pub convergence_patience: u32,
    /// Minimum accumulated ballots before early stopping is allowed
    pub min_ballots_for_convergence: usize,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            num_rounds: 10,
            committee_size: 3,
            temperature: 0.8,
            convergence_threshold: 0.01,
            convergence_patience: 2,
            min_ballots_for_convergence: 6,
        }
    }
}

impl SwarmConfig {
    pub fn with_num_rounds(mut self, num_rounds: u32) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    pub fn with_committee_size(mut self, committee_size: usize) -> Self {
        self.committee_size = committee_size;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_convergence_patience(mut self, patience: u32) -> Self {
        self.convergence_patience = patience;
        self
    }

    pub fn with_min_ballots_for_convergence(mut self, min_ballots: usize) -> Self {
        self.min_ballots_for_convergence = min_ballots;
        self
    }

    /// Check the configuration for values that would make a run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.committee_size == 0 {
            return Err(ConfigError::ZeroCommittee);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::TemperatureOutOfRange(self.temperature));
        }
        if self.convergence_threshold <= 0.0 {
            return Err(ConfigError::NonPositiveThreshold(self.convergence_threshold));
        }
        if self.convergence_patience == 0 {
            return Err(ConfigError::ZeroPatience);
        }
        Ok(())
    }

    /// Build the stopping rule this configuration describes
    pub fn detector(&self) -> ConvergenceDetector {
        ConvergenceDetector::new(
            self.convergence_threshold,
            self.convergence_patience,
            self.min_ballots_for_convergence,
        )
    }
}
