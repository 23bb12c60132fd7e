use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use menhir::{LedgerWriter, load_ledger};
use tools::config::RunnerConfig;
use tools::runner::{CREATED_BY, run_tournament};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Runs a menhir tournament described by a TOML file", long_about = None)]
struct Args {
    /// Path to the runner configuration
    #[arg(short, long, default_value = "resources/runner.toml")]
    config: PathBuf,
    /// Overrides the configured base seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Overrides the configured number of rounds
    #[arg(short, long)]
    rounds: Option<u32>,
    /// Print the totals recorded in the configured ledger and exit
    #[arg(long)]
    totals_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = RunnerConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }

    if args.totals_only {
        let path = config.ledger.as_deref().context("no ledger is configured")?;
        let loaded = load_ledger(path)
            .with_context(|| format!("failed to load score ledger {}", path.display()))?;
        println!("{} matches recorded in {}", loaded.entries.len(), path.display());
        for (name, total) in loaded.totals() {
            println!("{name:>20} {total:>8}");
        }
        return Ok(());
    }

    let mut ledger = match &config.ledger {
        Some(path) => Some(
            LedgerWriter::open_or_create(path, CREATED_BY)
                .with_context(|| format!("failed to open score ledger {}", path.display()))?,
        ),
        None => None,
    };

    let summary = run_tournament(&config, ledger.as_mut())?;

    println!(
        "Tournament complete: {} matches scored, {} abandoned.",
        summary.matches.len(),
        summary.abandoned
    );
    for (rank, (name, total)) in summary.standings().into_iter().enumerate() {
        println!("{:>3}. {name:<20} {total:>8}", rank + 1);
    }

    Ok(())
}
