//! Palaver — a small population of LLM-driven persons talking to each other.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use palaver_llm::Oracle;
use palaver_sim::config::SimConfig;

#[derive(Debug, Parser)]
#[command(
    name = "palaver",
    about = "Run a social conversation simulation against an LLM oracle"
)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of persons to bootstrap.
    #[arg(long)]
    population: Option<usize>,

    /// Message-pairs per conversation.
    #[arg(long)]
    rounds: Option<usize>,

    /// Conversations to run before exiting.
    #[arg(long)]
    encounters: Option<usize>,

    /// Delay between streamed dialogue lines, in milliseconds.
    #[arg(long)]
    pace_ms: Option<u64>,

    /// RNG seed for deterministic casting and pairing.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(population) = args.population {
        config.population = population;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(encounters) = args.encounters {
        config.encounters = encounters;
    }
    if let Some(pace_ms) = args.pace_ms {
        config.pace_ms = pace_ms;
    }

    let oracle: Arc<dyn Oracle> = Arc::new(config.oracle.build()?);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    palaver_sim::run_sim(&config, oracle, &mut rng).await
}
