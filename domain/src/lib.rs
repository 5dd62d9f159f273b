//! Domain layer for verdict-swarm
//!
//! This crate contains the core business logic for swarm verdict aggregation.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Committee Rounds
//!
//! A factual yes/no/null question is put to repeated committees of judges.
//! Each committee member is an (archetype, backend) pair: a fixed evaluation
//! persona run against a reasoning backend. Every successful invocation casts
//! a [`Ballot`]; failed invocations cast nothing.
//!
//! ## Aggregation
//!
//! Accumulated ballots are fused into a [`VerdictDistribution`]: a
//! Dirichlet-multinomial posterior over {YES, NO, NULL} with credible
//! intervals, Shannon entropy, Fleiss' kappa agreement, and a
//! correlation-discounted effective sample size.
//!
//! ## Convergence
//!
//! Per-round unweighted frequency snapshots feed a KL-divergence early
//! stopping rule with a patience counter ([`ConvergenceDetector`]).

pub mod archetype;
pub mod ballot;
pub mod convergence;
pub mod core;
pub mod evidence;
pub mod prompt;
pub mod sampler;
pub mod stats;
pub mod verdict;

// Re-export commonly used types
pub use archetype::Archetype;
pub use ballot::{Ballot, Vote, parse_ballot};
pub use convergence::ConvergenceDetector;
pub use core::{error::DomainError, model_id::ModelId};
pub use evidence::{EvidenceBundle, EvidenceItem};
pub use prompt::PromptTemplate;
pub use sampler::{CommitteeSampler, UniformSampler};
pub use stats::{
    build_verdict, dirichlet_posterior, effective_sample_size, fleiss_kappa, frequencies,
    kl_divergence, shannon_entropy, vote_counts,
};
pub use verdict::{ConvergenceSnapshot, CredibleInterval, CredibleIntervals, VerdictDistribution};
