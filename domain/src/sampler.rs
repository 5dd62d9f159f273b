//! Committee composition
//!
//! Each round the orchestrator asks a [`CommitteeSampler`] for the
//! (archetype, backend) pairs that will sit on that round's committee. The
//! trait seam exists so tests and reproducible runs can pin the draw while
//! production uses an entropy-seeded uniform sampler.

use crate::archetype::Archetype;
use crate::core::model_id::ModelId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy for drawing one round's committee
pub trait CommitteeSampler: Send {
    /// Draw `committee_size` (archetype, backend) pairs for one round
    ///
    /// Returns an empty committee when either pool is empty.
    fn sample(
        &mut self,
        archetypes: &[Archetype],
        models: &[ModelId],
        committee_size: usize,
    ) -> Vec<(Archetype, ModelId)>;
}

/// Uniform sampling with replacement over both pools
///
/// Archetype and backend are drawn independently, so the same pairing can
/// appear more than once in a round. That repetition is intended: the
/// effective sample size statistic accounts for the resulting correlation.
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    /// Sampler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler with a fixed seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitteeSampler for UniformSampler {
    fn sample(
        &mut self,
        archetypes: &[Archetype],
        models: &[ModelId],
        committee_size: usize,
    ) -> Vec<(Archetype, ModelId)> {
        if archetypes.is_empty() || models.is_empty() {
            return Vec::new();
        }
        (0..committee_size)
            .map(|_| {
                let archetype = archetypes[self.rng.gen_range(0..archetypes.len())].clone();
                let model = models[self.rng.gen_range(0..models.len())].clone();
                (archetype, model)
            })
            .collect()
    }
}
