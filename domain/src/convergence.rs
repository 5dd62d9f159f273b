//! KL-divergence early stopping
//!
//! The orchestrator feeds each round's snapshot history into a
//! [`ConvergenceDetector`]. When the divergence between consecutive snapshots
//! stays under the threshold for `patience` consecutive rounds, and enough
//! ballots have accumulated for the snapshot to mean anything, the run stops
//! early.

use crate::stats::kl_divergence;
use crate::verdict::ConvergenceSnapshot;

/// Stateful stopping rule over the snapshot history
///
/// # Example
///
/// ```
/// use verdict_domain::{ConvergenceDetector, ConvergenceSnapshot};
///
/// let mut detector = ConvergenceDetector::new(0.01, 2, 4);
/// let stable = ConvergenceSnapshot { round: 1, p_yes: 1.0, p_no: 0.0, p_null: 0.0 };
/// let mut history = vec![stable.clone()];
/// for round in 2..=3 {
///     history.push(ConvergenceSnapshot { round, ..stable.clone() });
///     detector.observe(&history, round as usize * 3);
/// }
/// assert_eq!(detector.converged_at(), Some(3));
/// ```
#[derive(Debug)]
pub struct ConvergenceDetector {
    threshold: f64,
    patience: u32,
    min_ballots: usize,
    streak: u32,
    converged_at: Option<u32>,
}

impl ConvergenceDetector {
    /// Create a detector
    ///
    /// `threshold` is the KL bound in bits, `patience` the number of
    /// consecutive sub-threshold rounds required, and `min_ballots` the
    /// minimum accumulated ballot count before the KL check runs at all.
    pub fn new(threshold: f64, patience: u32, min_ballots: usize) -> Self {
        Self {
            threshold,
            patience,
            min_ballots,
            streak: 0,
            converged_at: None,
        }
    }

    /// Record the latest round and report whether the run should stop
    ///
    /// `snapshots` is the full history in round order, newest last;
    /// `ballot_count` is the total ballots accumulated so far. The KL check
    /// runs only once `ballot_count` has reached the configured minimum;
    /// rounds below it neither advance nor reset the patience streak. The
    /// first snapshot alone can never converge. A round whose divergence
    /// exceeds the threshold resets the streak.
    pub fn observe(&mut self, snapshots: &[ConvergenceSnapshot], ballot_count: usize) -> bool {
        if self.converged_at.is_some() {
            return true;
        }
        if ballot_count < self.min_ballots {
            return false;
        }
        let [.., previous, current] = snapshots else {
            return false;
        };

        let divergence = kl_divergence(current.distribution(), previous.distribution());
        if divergence < self.threshold {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        if self.streak >= self.patience {
            self.converged_at = Some(current.round);
            return true;
        }
        false
    }

    /// The round at which stopping triggered, if it has
    pub fn converged_at(&self) -> Option<u32> {
        self.converged_at
    }
}
