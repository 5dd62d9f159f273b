//! Dirichlet-multinomial posterior estimation
//!
//! The three vote categories form a multinomial with a symmetric
//! Dirichlet(1, 1, 1) prior. Observed counts update the prior to
//! Dirichlet(n_yes+1, n_no+1, n_null+1); the posterior mean is the normalized
//! concentration vector. Credible intervals come from sampling the posterior
//! itself, not a Gaussian approximation: vote counts are frequently small and
//! the marginals are heavily skewed near 0 and 1.

use crate::ballot::Ballot;
use crate::verdict::{CredibleInterval, CredibleIntervals};
use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

/// Number of posterior draws behind the reported credible intervals
pub const DEFAULT_POSTERIOR_SAMPLES: usize = 10_000;

/// Symmetric prior concentration for each category
const PRIOR: f64 = 1.0;

/// Posterior mean and credible intervals for one ballot multiset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosteriorSummary {
    /// Posterior mean in canonical (YES, NO, NULL) order
    pub mean: [f64; 3],
    /// 95% credible interval per outcome
    pub intervals: CredibleIntervals,
}

/// Raw per-category vote counts in canonical (YES, NO, NULL) order
pub fn vote_counts(ballots: &[Ballot]) -> [f64; 3] {
    let mut counts = [0.0; 3];
    for ballot in ballots {
        counts[ballot.vote.index()] += 1.0;
    }
    counts
}

/// Plain relative frequencies in canonical (YES, NO, NULL) order
///
/// Used only for convergence snapshots and the KL stopping rule, never as
/// the final answer. Zero ballots yield all zeros.
pub fn frequencies(ballots: &[Ballot]) -> [f64; 3] {
    if ballots.is_empty() {
        return [0.0; 3];
    }
    let total = ballots.len() as f64;
    vote_counts(ballots).map(|c| c / total)
}

/// Compute the Dirichlet posterior mean and 95% credible intervals
///
/// With zero ballots this reports the prior alone: mean 1/3 per category and
/// wide intervals. A designed fallback, never a division by zero.
pub fn dirichlet_posterior<R: Rng + ?Sized>(
    ballots: &[Ballot],
    num_samples: usize,
    rng: &mut R,
) -> PosteriorSummary {
    let counts = vote_counts(ballots);
    let alpha = counts.map(|c| c + PRIOR);
    let total: f64 = alpha.iter().sum();
    let mean = alpha.map(|a| a / total);

    // Concentration parameters are always >= 1, so construction cannot fail.
    let dist = Dirichlet::new(&alpha).expect("Dirichlet concentrations are positive");

    let mut marginals: [Vec<f64>; 3] = [
        Vec::with_capacity(num_samples),
        Vec::with_capacity(num_samples),
        Vec::with_capacity(num_samples),
    ];
    for _ in 0..num_samples {
        let draw = dist.sample(rng);
        for (marginal, value) in marginals.iter_mut().zip(draw) {
            marginal.push(value);
        }
    }
    for marginal in &mut marginals {
        marginal.sort_unstable_by(|a, b| a.total_cmp(b));
    }

    let interval =
        |m: &[f64]| CredibleInterval::new(percentile(m, 2.5), percentile(m, 97.5));

    PosteriorSummary {
        mean,
        intervals: CredibleIntervals {
            yes: interval(&marginals[0]),
            no: interval(&marginals[1]),
            null: interval(&marginals[2]),
        },
    }
}

/// Linearly interpolated percentile over a sorted sample
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let weight = rank - lo as f64;
        sorted[lo] * (1.0 - weight) + sorted[hi] * weight
    }
}
