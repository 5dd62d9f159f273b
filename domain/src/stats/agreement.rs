//! Inter-rater agreement and correlation-aware sample size
//!
//! Fleiss' kappa treats each round as a subject rated by that round's
//! committee. The effective sample size discounts the raw ballot count for
//! within-backend correlation using the survey-sampling design effect.

use crate::ballot::Ballot;
use crate::core::model_id::ModelId;
use std::collections::BTreeMap;

/// Fleiss' kappa across rounds
///
/// Rounds are the subjects and the three vote categories are the rating
/// classes. Rounds with fewer than two ballots carry no agreement signal and
/// are dropped. Returns 0.0 when fewer than two rounds remain, and 1.0 when
/// expected agreement saturates (every ballot in one category).
pub fn fleiss_kappa(ballots: &[Ballot]) -> f64 {
    let mut rounds: BTreeMap<u32, [f64; 3]> = BTreeMap::new();
    for ballot in ballots {
        rounds.entry(ballot.round).or_default()[ballot.vote.index()] += 1.0;
    }
    rounds.retain(|_, counts| counts.iter().sum::<f64>() >= 2.0);
    if rounds.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut category_totals = [0.0; 3];
    let mut observed_sum = 0.0;
    for counts in rounds.values() {
        let n: f64 = counts.iter().sum();
        total += n;
        let mut same_pairs = 0.0;
        for (j, &c) in counts.iter().enumerate() {
            category_totals[j] += c;
            same_pairs += c * c;
        }
        // Proportion of agreeing rater pairs within the round.
        observed_sum += (same_pairs - n) / (n * (n - 1.0));
    }

    let p_observed = observed_sum / rounds.len() as f64;
    let p_expected: f64 = category_totals
        .iter()
        .map(|&c| (c / total) * (c / total))
        .sum();

    if (1.0 - p_expected).abs() < 1e-10 {
        return 1.0;
    }
    (p_observed - p_expected) / (1.0 - p_expected)
}

/// Effective sample size after discounting same-backend correlation
///
/// Ballots from the same backend model form a cluster. The intra-cluster
/// correlation is estimated from each cluster's plurality agreement, rescaled
/// so that chance-level agreement (1/3) maps to zero, then fed through the
/// design effect `1 + (avg_cluster_size - 1) * rho`. With no repeated
/// backends the answer is simply the ballot count; with no ballots it is 0.
pub fn effective_sample_size(ballots: &[Ballot]) -> f64 {
    if ballots.is_empty() {
        return 0.0;
    }
    let n = ballots.len() as f64;

    let mut clusters: BTreeMap<&ModelId, [f64; 3]> = BTreeMap::new();
    for ballot in ballots {
        clusters.entry(&ballot.model).or_default()[ballot.vote.index()] += 1.0;
    }

    let multi: Vec<&[f64; 3]> = clusters
        .values()
        .filter(|counts| counts.iter().sum::<f64>() >= 2.0)
        .collect();
    if multi.is_empty() {
        return n;
    }

    // Singleton clusters agree with themselves trivially; only clusters with
    // two or more ballots inform the correlation estimate.
    let mut agreement_sum = 0.0;
    for counts in &multi {
        let size: f64 = counts.iter().sum();
        let plurality = counts.iter().cloned().fold(0.0, f64::max);
        agreement_sum += plurality / size;
    }
    let mean_agreement = agreement_sum / multi.len() as f64;
    let avg_cluster = n / clusters.len() as f64;

    let rho = ((mean_agreement - 1.0 / 3.0) / (2.0 / 3.0)).max(0.0);
    let deff = 1.0 + (avg_cluster - 1.0) * rho;
    n / deff
}
