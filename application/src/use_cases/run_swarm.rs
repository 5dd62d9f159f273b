//! Swarm polling orchestration
//!
//! Drives up to `num_rounds` committee rounds against the backend pool. Each
//! round samples a committee, fans the judges out concurrently, accumulates
//! whatever ballots come back, and checks the early stopping rule. The same
//! loop serves both the batch [`RunSwarmUseCase::execute`] and the streaming
//! [`RunSwarmUseCase::stream`] entry points.

use crate::config::{ConfigError, SwarmConfig};
use crate::ports::backend_gateway::{BackendPool, GatewayError};
use crate::ports::judge::JudgeInvoker;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use verdict_domain::{
    Archetype, Ballot, CommitteeSampler, ConvergenceSnapshot, EvidenceBundle, ModelId,
    UniformSampler, VerdictDistribution, build_verdict,
};

/// Errors from running a swarm evaluation
#[derive(Debug, Error)]
pub enum RunSwarmError {
    #[error("No archetypes available to form a committee")]
    NoArchetypes,

    #[error("No backend models available")]
    NoBackends,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Progress events emitted on the streaming path
#[derive(Debug, Clone)]
pub enum SwarmEvent {
    /// A round finished; frequencies over all ballots so far
    Snapshot(ConvergenceSnapshot),
    /// The run finished; the final fused verdict
    Verdict(VerdictDistribution),
}

/// Input for one swarm evaluation
#[derive(Debug, Clone)]
pub struct RunSwarmInput {
    pub bundle: EvidenceBundle,
    pub archetypes: Vec<Archetype>,
    pub config: SwarmConfig,
}

impl RunSwarmInput {
    /// Input with the built-in archetypes and default configuration
    pub fn new(bundle: EvidenceBundle) -> Self {
        Self {
            bundle,
            archetypes: Archetype::builtins(),
            config: SwarmConfig::default(),
        }
    }

    pub fn with_archetypes(mut self, archetypes: Vec<Archetype>) -> Self {
        self.archetypes = archetypes;
        self
    }

    pub fn with_config(mut self, config: SwarmConfig) -> Self {
        self.config = config;
        self
    }
}

/// Receiving side of a streaming run
///
/// Yields [`SwarmEvent::Snapshot`] per completed round and ends with a single
/// [`SwarmEvent::Verdict`].
pub struct SwarmStream {
    receiver: mpsc::Receiver<SwarmEvent>,
}

impl SwarmStream {
    /// Next event, or `None` once the run has finished
    pub async fn next(&mut self) -> Option<SwarmEvent> {
        self.receiver.recv().await
    }

    /// Drain the stream and return the final verdict
    ///
    /// A started run always ends with one; `None` only occurs if the
    /// driving task was aborted externally.
    pub async fn collect_verdict(mut self) -> Option<VerdictDistribution> {
        let mut verdict = None;
        while let Some(event) = self.next().await {
            if let SwarmEvent::Verdict(v) = event {
                verdict = Some(v);
            }
        }
        verdict
    }
}

/// Use case: poll a committee swarm and fuse its ballots into a verdict
pub struct RunSwarmUseCase<J> {
    judge: Arc<J>,
    pool: Arc<dyn BackendPool>,
    sampler: Mutex<Box<dyn CommitteeSampler>>,
}

impl<J: JudgeInvoker + 'static> RunSwarmUseCase<J> {
    /// Use case with an entropy-seeded uniform committee sampler
    pub fn new(judge: Arc<J>, pool: Arc<dyn BackendPool>) -> Self {
        Self {
            judge,
            pool,
            sampler: Mutex::new(Box::new(UniformSampler::new())),
        }
    }

    /// Replace the committee sampler, e.g. with a seeded one
    pub fn with_sampler(mut self, sampler: Box<dyn CommitteeSampler>) -> Self {
        self.sampler = Mutex::new(sampler);
        self
    }

    /// Run the swarm to completion and return the fused verdict
    pub async fn execute(&self, input: RunSwarmInput) -> Result<VerdictDistribution, RunSwarmError> {
        let models = self.validate(&input).await?;
        Ok(self.run_rounds(input, models, None).await)
    }

    /// Run the swarm in the background, streaming progress events
    ///
    /// Configuration, committee inputs, and backend availability are all
    /// checked before anything is spawned, so every startup failure surfaces
    /// here rather than as a silently empty stream. Once started, the run
    /// always ends with a [`SwarmEvent::Verdict`].
    pub async fn stream(
        self: Arc<Self>,
        input: RunSwarmInput,
    ) -> Result<SwarmStream, RunSwarmError> {
        let models = self.validate(&input).await?;

        let (tx, receiver) = mpsc::channel(32);
        tokio::spawn(async move {
            let verdict = self.run_rounds(input, models, Some(&tx)).await;
            let _ = tx.send(SwarmEvent::Verdict(verdict)).await;
        });

        Ok(SwarmStream { receiver })
    }

    /// Fatal startup checks, run before any round executes
    async fn validate(&self, input: &RunSwarmInput) -> Result<Vec<ModelId>, RunSwarmError> {
        input.config.validate()?;
        if input.archetypes.is_empty() {
            return Err(RunSwarmError::NoArchetypes);
        }

        let models = self.pool.available_models().await?;
        if models.is_empty() {
            return Err(RunSwarmError::NoBackends);
        }
        Ok(models)
    }

    async fn run_rounds(
        &self,
        input: RunSwarmInput,
        models: Vec<ModelId>,
        events: Option<&mpsc::Sender<SwarmEvent>>,
    ) -> VerdictDistribution {
        let config = &input.config;
        let bundle = Arc::new(input.bundle);
        info!(
            question = %bundle.question,
            num_rounds = config.num_rounds,
            committee_size = config.committee_size,
            models = models.len(),
            "Starting swarm evaluation"
        );

        let mut detector = config.detector();
        let mut ballots: Vec<Ballot> = Vec::new();
        let mut snapshots: Vec<ConvergenceSnapshot> = Vec::new();

        for round in 1..=config.num_rounds {
            let committee = {
                // Sync lock held only for the draw, never across an await.
                let mut sampler = self
                    .sampler
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                sampler.sample(&input.archetypes, &models, config.committee_size)
            };

            let mut tasks = JoinSet::new();
            for (archetype, model) in committee {
                let judge = Arc::clone(&self.judge);
                let bundle = Arc::clone(&bundle);
                tasks.spawn(async move {
                    judge.evaluate(&archetype, &model, &bundle, round).await
                });
            }

            let mut cast = 0_usize;
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Some(ballot)) => {
                        cast += 1;
                        ballots.push(ballot);
                    }
                    Ok(None) => {}
                    Err(e) => warn!(round, error = %e, "Judge task panicked"),
                }
            }

            let snapshot = ConvergenceSnapshot::from_ballots(round, &ballots);
            info!(
                round,
                cast,
                total_ballots = ballots.len(),
                p_yes = snapshot.p_yes,
                p_no = snapshot.p_no,
                p_null = snapshot.p_null,
                "Round complete"
            );
            snapshots.push(snapshot.clone());
            if let Some(tx) = events {
                let _ = tx.send(SwarmEvent::Snapshot(snapshot)).await;
            }

            if detector.observe(&snapshots, ballots.len()) {
                info!(round, "Vote distribution converged, stopping early");
                break;
            }
        }

        let converged_at = detector.converged_at();
        build_verdict(
            bundle.question.clone(),
            ballots,
            snapshots,
            config.num_rounds,
            config.committee_size,
            converged_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend_gateway::BackendGateway;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use verdict_domain::{ModelId, Vote};

    /// Judge that replays a scripted sequence of votes (None = failed judge)
    struct ScriptedJudge {
        votes: Mutex<VecDeque<Option<Vote>>>,
        rounds_seen: Mutex<Vec<u32>>,
    }

    impl ScriptedJudge {
        fn new(votes: Vec<Option<Vote>>) -> Self {
            Self {
                votes: Mutex::new(votes.into()),
                rounds_seen: Mutex::new(Vec::new()),
            }
        }

        fn max_round_seen(&self) -> u32 {
            self.rounds_seen
                .lock()
                .unwrap()
                .iter()
                .copied()
                .max()
                .unwrap_or(0)
        }
    }

    #[async_trait]
    impl JudgeInvoker for ScriptedJudge {
        async fn evaluate(
            &self,
            archetype: &Archetype,
            model: &ModelId,
            _bundle: &EvidenceBundle,
            round: u32,
        ) -> Option<Ballot> {
            self.rounds_seen.lock().unwrap().push(round);
            let vote = self.votes.lock().unwrap().pop_front().flatten()?;
            Some(Ballot::new(round, archetype.name(), model.clone(), vote))
        }
    }

    struct StaticPool {
        models: Vec<ModelId>,
    }

    #[async_trait]
    impl BackendGateway for StaticPool {
        async fn complete(
            &self,
            _model: &ModelId,
            _system_prompt: &str,
            _user_prompt: &str,
            _temperature: f64,
        ) -> Result<String, GatewayError> {
            Err(GatewayError::Other("static pool cannot complete".to_string()))
        }

        async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError> {
            Ok(self.models.clone())
        }
    }

    fn pool(models: &[&str]) -> Arc<dyn BackendPool> {
        Arc::new(StaticPool {
            models: models.iter().map(|m| ModelId::new(*m)).collect(),
        })
    }

    fn bundle() -> EvidenceBundle {
        EvidenceBundle::new("Did it happen?", vec![], vec![])
    }

    fn use_case(
        judge: ScriptedJudge,
        models: &[&str],
    ) -> (Arc<ScriptedJudge>, RunSwarmUseCase<ScriptedJudge>) {
        let judge = Arc::new(judge);
        let uc = RunSwarmUseCase {
            judge: Arc::clone(&judge),
            pool: pool(models),
            sampler: Mutex::new(Box::new(UniformSampler::seeded(11))),
        };
        (judge, uc)
    }

    #[tokio::test]
    async fn test_execute_fuses_mixed_ballots() {
        use Vote::{No, Null, Yes};
        // 3 rounds x 3 judges: 6 YES, 2 NO, 1 NULL.
        let votes = vec![
            Some(Yes), Some(Yes), Some(No),
            Some(Yes), Some(Null), Some(Yes),
            Some(Yes), Some(No), Some(Yes),
        ];
        let (_, uc) = use_case(ScriptedJudge::new(votes), &["m1", "m2"]);

        let config = SwarmConfig::default()
            .with_num_rounds(3)
            .with_convergence_threshold(1e-6)
            .with_min_ballots_for_convergence(100);
        let input = RunSwarmInput::new(bundle()).with_config(config);

        let verdict = uc.execute(input).await.unwrap();

        assert_eq!(verdict.ballots.len(), 9);
        assert!(verdict.p_yes > 0.55);
        assert!(verdict.p_yes > verdict.p_no && verdict.p_no > verdict.p_null);
        assert!(verdict.credible_intervals_95.yes.lower > 0.0);
        assert!(!verdict.converged_early());
        assert_eq!(verdict.convergence.len(), 3);
        let rounds: Vec<u32> = verdict.convergence.iter().map(|s| s.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_execute_with_all_judges_failing() {
        let votes = vec![None; 6];
        let (_, uc) = use_case(ScriptedJudge::new(votes), &["m1"]);

        let config = SwarmConfig::default().with_num_rounds(2);
        let input = RunSwarmInput::new(bundle()).with_config(config);

        let verdict = uc.execute(input).await.unwrap();

        // No ballots: posterior degrades to the uniform prior.
        assert!(verdict.ballots.is_empty());
        assert!((verdict.p_yes - 1.0 / 3.0).abs() < 1e-9);
        assert!((verdict.entropy - 3.0_f64.log2()).abs() < 1e-9);
        assert_eq!(verdict.fleiss_kappa, 0.0);
        assert_eq!(verdict.effective_sample_size, 0.0);
    }

    #[tokio::test]
    async fn test_execute_stops_early_on_convergence() {
        // Unanimous YES forever. Rounds 2 and 3 sit below the 10-ballot
        // floor and accrue no patience; round 4 (12 ballots) is the first
        // countable stable round, so the patience-2 streak completes at
        // round 5 and round 6 never runs.
        let votes = vec![Some(Vote::Yes); 30];
        let (judge, uc) = use_case(ScriptedJudge::new(votes), &["m1", "m2"]);

        let config = SwarmConfig::default()
            .with_num_rounds(10)
            .with_min_ballots_for_convergence(10);
        let input = RunSwarmInput::new(bundle()).with_config(config);

        let verdict = uc.execute(input).await.unwrap();

        assert_eq!(verdict.converged_at_round, Some(5));
        assert_eq!(judge.max_round_seen(), 5);
        assert_eq!(verdict.convergence.len(), 5);
        assert_eq!(verdict.ballots.len(), 15);
        assert!(verdict.p_yes > 0.8);
    }

    #[tokio::test]
    async fn test_late_stabilization_stops_at_round_five() {
        use Vote::{No, Yes};
        // Cumulative frequencies swing through round 3, then settle: the
        // round 4 and round 5 snapshots each diverge from their predecessor
        // by well under the threshold, completing the patience-2 streak at
        // round 5. Round 6 must never execute.
        let votes = vec![
            Some(Yes), Some(Yes), Some(No),
            Some(No), Some(No), Some(No),
            Some(Yes), Some(Yes), Some(Yes),
            Some(Yes), Some(Yes), Some(No),
            Some(Yes), Some(Yes), Some(No),
        ];
        let (judge, uc) = use_case(ScriptedJudge::new(votes), &["m1", "m2"]);

        let input = RunSwarmInput::new(bundle())
            .with_config(SwarmConfig::default().with_num_rounds(10));

        let verdict = uc.execute(input).await.unwrap();

        assert_eq!(verdict.converged_at_round, Some(5));
        assert_eq!(judge.max_round_seen(), 5);
        assert_eq!(verdict.ballots.len(), 15);
        assert_eq!(verdict.convergence.len(), 5);
    }

    #[tokio::test]
    async fn test_execute_rejects_empty_inputs() {
        let (_, uc) = use_case(ScriptedJudge::new(vec![]), &[]);
        let err = uc.execute(RunSwarmInput::new(bundle())).await.unwrap_err();
        assert!(matches!(err, RunSwarmError::NoBackends));

        let (_, uc) = use_case(ScriptedJudge::new(vec![]), &["m1"]);
        let input = RunSwarmInput::new(bundle()).with_archetypes(vec![]);
        let err = uc.execute(input).await.unwrap_err();
        assert!(matches!(err, RunSwarmError::NoArchetypes));

        let (_, uc) = use_case(ScriptedJudge::new(vec![]), &["m1"]);
        let input =
            RunSwarmInput::new(bundle()).with_config(SwarmConfig::default().with_num_rounds(0));
        let err = uc.execute(input).await.unwrap_err();
        assert!(matches!(err, RunSwarmError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_stream_emits_snapshots_then_verdict() {
        let votes = vec![Some(Vote::Yes); 6];
        let (_, uc) = use_case(ScriptedJudge::new(votes), &["m1"]);
        let uc = Arc::new(uc);

        let config = SwarmConfig::default()
            .with_num_rounds(2)
            .with_convergence_threshold(1e-6)
            .with_min_ballots_for_convergence(100);
        let input = RunSwarmInput::new(bundle()).with_config(config);

        let mut stream = uc.stream(input).await.unwrap();
        let mut snapshots = 0;
        let mut verdict = None;
        while let Some(event) = stream.next().await {
            match event {
                SwarmEvent::Snapshot(s) => {
                    assert!(verdict.is_none(), "snapshot after verdict");
                    assert_eq!(s.round, snapshots + 1);
                    snapshots += 1;
                }
                SwarmEvent::Verdict(v) => verdict = Some(v),
            }
        }

        assert_eq!(snapshots, 2);
        let verdict = verdict.expect("stream ended without a verdict");
        assert_eq!(verdict.ballots.len(), 6);
        assert!(verdict.p_yes > 0.7);
    }

    #[tokio::test]
    async fn test_stream_validates_before_spawning() {
        let (_, uc) = use_case(ScriptedJudge::new(vec![]), &["m1"]);
        let uc = Arc::new(uc);

        let input = RunSwarmInput::new(bundle()).with_archetypes(vec![]);
        assert!(matches!(
            uc.stream(input).await,
            Err(RunSwarmError::NoArchetypes)
        ));
    }

    #[tokio::test]
    async fn test_stream_surfaces_empty_pool_as_error() {
        // An empty backend pool is a fatal startup failure; the streaming
        // entry point must report it, not hand back a stream that silently
        // ends with no verdict.
        let (_, uc) = use_case(ScriptedJudge::new(vec![]), &[]);
        let uc = Arc::new(uc);

        assert!(matches!(
            uc.stream(RunSwarmInput::new(bundle())).await,
            Err(RunSwarmError::NoBackends)
        ));
    }

    #[tokio::test]
    async fn test_stream_collect_verdict() {
        let votes = vec![Some(Vote::No); 3];
        let (_, uc) = use_case(ScriptedJudge::new(votes), &["m1"]);
        let uc = Arc::new(uc);

        let config = SwarmConfig::default()
            .with_num_rounds(1)
            .with_committee_size(3);
        let input = RunSwarmInput::new(bundle()).with_config(config);

        let verdict = uc
            .stream(input)
            .await
            .unwrap()
            .collect_verdict()
            .await
            .unwrap();
        assert!(verdict.p_no > verdict.p_yes);
    }
}
