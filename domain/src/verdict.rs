//! Aggregated output types
//!
//! [`ConvergenceSnapshot`] is the per-round progress view (plain frequencies,
//! used by the KL stopping rule). [`VerdictDistribution`] is the final fused
//! answer (Dirichlet posterior with uncertainty bounds). The two deliberately
//! use different statistical models; neither is derived from the other.

use crate::ballot::Ballot;
use crate::stats;
use serde::{Deserialize, Serialize};

/// Unweighted vote frequencies over all ballots accumulated through a round
///
/// One snapshot is produced per round, in round order. With zero ballots all
/// three probabilities are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSnapshot {
    /// Round this snapshot was taken after (1-indexed)
    pub round: u32,
    pub p_yes: f64,
    pub p_no: f64,
    pub p_null: f64,
}

impl ConvergenceSnapshot {
    /// Compute the snapshot for `round` from all ballots seen so far
    pub fn from_ballots(round: u32, ballots: &[Ballot]) -> Self {
        let [p_yes, p_no, p_null] = stats::frequencies(ballots);
        Self {
            round,
            p_yes,
            p_no,
            p_null,
        }
    }

    /// The frequency triple in canonical (YES, NO, NULL) order
    pub fn distribution(&self) -> [f64; 3] {
        [self.p_yes, self.p_no, self.p_null]
    }
}

/// 95% credible interval for one outcome's posterior marginal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibleInterval {
    pub lower: f64,
    pub upper: f64,
}

impl CredibleInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Whether a value falls inside the interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Interval width
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Per-outcome 95% credible intervals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibleIntervals {
    pub yes: CredibleInterval,
    pub no: CredibleInterval,
    pub null: CredibleInterval,
}

/// The final fused verdict for one evaluation run
///
/// `p_yes`/`p_no`/`p_null` are the Dirichlet posterior mean, not the raw
/// frequencies reported in snapshots. The triple sums to 1 within floating
/// tolerance, and each credible interval contains its posterior mean by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictDistribution {
    /// The question that was evaluated
    pub question: String,
    /// Posterior mean probability of YES
    pub p_yes: f64,
    /// Posterior mean probability of NO
    pub p_no: f64,
    /// Posterior mean probability of NULL
    pub p_null: f64,
    /// Configured number of rounds for the run
    pub num_rounds: u32,
    /// Configured committee size per round
    pub committee_size: usize,
    /// Round at which early stopping triggered, if it did
    pub converged_at_round: Option<u32>,
    /// Per-outcome 95% credible intervals from posterior sampling
    pub credible_intervals_95: CredibleIntervals,
    /// Shannon entropy of the posterior mean, in bits
    pub entropy: f64,
    /// Fleiss' kappa inter-rater agreement across rounds
    pub fleiss_kappa: f64,
    /// Ballot count discounted for same-backend correlation
    pub effective_sample_size: f64,
    /// Full ballot history, in arrival order
    pub ballots: Vec<Ballot>,
    /// Full snapshot history, in round order
    pub convergence: Vec<ConvergenceSnapshot>,
}

impl VerdictDistribution {
    /// The posterior mean triple in canonical (YES, NO, NULL) order
    pub fn posterior(&self) -> [f64; 3] {
        [self.p_yes, self.p_no, self.p_null]
    }

    /// Whether the run stopped before exhausting its configured rounds
    pub fn converged_early(&self) -> bool {
        self.converged_at_round.is_some()
    }
}
