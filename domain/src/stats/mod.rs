//! Vote aggregation statistics
//!
//! Pure functions over the accumulated ballot multiset: the
//! Dirichlet-multinomial posterior with credible intervals, plain snapshot
//! frequencies, Shannon entropy, KL divergence, Fleiss' kappa, and the
//! design-effect-corrected effective sample size.

pub mod agreement;
pub mod divergence;
pub mod posterior;

pub use agreement::{effective_sample_size, fleiss_kappa};
pub use divergence::{KL_EPSILON, kl_divergence, shannon_entropy};
pub use posterior::{
    DEFAULT_POSTERIOR_SAMPLES, PosteriorSummary, dirichlet_posterior, frequencies, vote_counts,
};

use crate::ballot::Ballot;
use crate::verdict::{ConvergenceSnapshot, VerdictDistribution};

/// Assemble the final [`VerdictDistribution`] from a completed run
///
/// Works for any ballot history, including an empty one: with zero ballots
/// the posterior degrades to the uniform Dirichlet prior (1/3 each), kappa is
/// 0, and the effective sample size is 0.
pub fn build_verdict(
    question: impl Into<String>,
    ballots: Vec<Ballot>,
    convergence: Vec<ConvergenceSnapshot>,
    num_rounds: u32,
    committee_size: usize,
    converged_at_round: Option<u32>,
) -> VerdictDistribution {
    let summary = dirichlet_posterior(
        &ballots,
        DEFAULT_POSTERIOR_SAMPLES,
        &mut rand::thread_rng(),
    );
    let [p_yes, p_no, p_null] = summary.mean;

    VerdictDistribution {
        question: question.into(),
        p_yes,
        p_no,
        p_null,
        num_rounds,
        committee_size,
        converged_at_round,
        credible_intervals_95: summary.intervals,
        entropy: shannon_entropy(summary.mean),
        fleiss_kappa: fleiss_kappa(&ballots),
        effective_sample_size: effective_sample_size(&ballots),
        ballots,
        convergence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::Vote;
    use crate::core::model_id::ModelId;

    #[test]
    fn test_build_verdict_with_no_ballots() {
        let verdict = build_verdict("Q?", vec![], vec![], 10, 3, None);

        assert!((verdict.p_yes - 1.0 / 3.0).abs() < 1e-9);
        assert!((verdict.p_no - 1.0 / 3.0).abs() < 1e-9);
        assert!((verdict.p_null - 1.0 / 3.0).abs() < 1e-9);
        assert!((verdict.entropy - 3.0_f64.log2()).abs() < 1e-9);
        assert_eq!(verdict.fleiss_kappa, 0.0);
        assert_eq!(verdict.effective_sample_size, 0.0);
        assert!(verdict.ballots.is_empty());
        assert!(!verdict.converged_early());
    }

    #[test]
    fn test_build_verdict_posterior_sums_to_one() {
        let ballots: Vec<Ballot> = (0..5)
            .map(|i| {
                let vote = if i < 4 { Vote::Yes } else { Vote::Null };
                Ballot::new(1, "a", ModelId::new(format!("m{i}")), vote)
            })
            .collect();

        let verdict = build_verdict("Q?", ballots, vec![], 10, 3, Some(4));

        let total = verdict.p_yes + verdict.p_no + verdict.p_null;
        assert!((total - 1.0).abs() < 1e-9);
        assert!(verdict.converged_early());
        assert_eq!(verdict.converged_at_round, Some(4));
    }
}
