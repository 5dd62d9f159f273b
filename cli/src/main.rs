//! CLI entrypoint for verdict-swarm
//!
//! Wires the layers together: loads configuration, builds the gateway and
//! judge, runs the swarm, and prints the fused verdict.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use verdict_application::{GatewayJudge, RunSwarmInput, RunSwarmUseCase, SwarmEvent};
use verdict_domain::{EvidenceBundle, ModelId, UniformSampler};
use verdict_infrastructure::{ConfigLoader, OpenAiCompatGateway};

/// Poll a committee of LLM judges and fuse their votes into a verdict
#[derive(Debug, Parser)]
#[command(name = "verdict", version, about)]
struct Cli {
    /// Path to the evidence bundle JSON file
    bundle: PathBuf,

    /// Maximum number of polling rounds
    #[arg(long)]
    rounds: Option<u32>,

    /// Judges per round
    #[arg(long)]
    committee: Option<usize>,

    /// Seed for the committee sampler (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Backend model to use (repeatable; overrides configuration)
    #[arg(long = "model")]
    model: Vec<String>,

    /// Explicit configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print per-round snapshots as they arrive
    #[arg(long)]
    stream: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };

    let bundle_text = std::fs::read_to_string(&cli.bundle)
        .with_context(|| format!("reading evidence bundle {}", cli.bundle.display()))?;
    let bundle: EvidenceBundle =
        serde_json::from_str(&bundle_text).context("parsing evidence bundle JSON")?;

    let mut swarm = config.swarm.clone();
    if let Some(rounds) = cli.rounds {
        swarm = swarm.with_num_rounds(rounds);
    }
    if let Some(committee) = cli.committee {
        swarm = swarm.with_committee_size(committee);
    }

    let models: Vec<ModelId> = if cli.model.is_empty() {
        config.backend.models.iter().cloned().map(ModelId::from).collect()
    } else {
        cli.model.iter().cloned().map(ModelId::from).collect()
    };
    if models.is_empty() {
        bail!("No backend models configured. Use --model or set backend.models.");
    }

    info!(
        question = %bundle.question,
        models = models.len(),
        rounds = swarm.num_rounds,
        "Starting verdict swarm"
    );

    // === Dependency Injection ===
    let gateway = Arc::new(
        OpenAiCompatGateway::new(&config.backend.base_url, config.backend.api_key(), models)
            .with_max_tokens(config.backend.max_tokens),
    );
    let judge = Arc::new(GatewayJudge::new(Arc::clone(&gateway), swarm.temperature));

    let mut use_case = RunSwarmUseCase::new(judge, gateway);
    if let Some(seed) = cli.seed {
        use_case = use_case.with_sampler(Box::new(UniformSampler::seeded(seed)));
    }

    let input = RunSwarmInput::new(bundle).with_config(swarm);

    let verdict = if cli.stream {
        let use_case = Arc::new(use_case);
        let mut stream = use_case.stream(input).await?;
        let mut verdict = None;
        while let Some(event) = stream.next().await {
            match event {
                SwarmEvent::Snapshot(s) => {
                    println!(
                        "round {:>2}  yes {:.3}  no {:.3}  null {:.3}",
                        s.round, s.p_yes, s.p_no, s.p_null
                    );
                }
                SwarmEvent::Verdict(v) => verdict = Some(v),
            }
        }
        match verdict {
            Some(v) => v,
            None => bail!("Swarm run failed before producing a verdict"),
        }
    } else {
        use_case.execute(input).await?
    };

    println!("{}", serde_json::to_string_pretty(&verdict)?);

    Ok(())
}
