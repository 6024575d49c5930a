use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use duel_engine::abilities::{describe, ABILITIES};
use duel_sim::cli::parse_args;
use duel_sim::{simulate_with, GameReport, SimConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();

    if args.list_abilities {
        for ability in ABILITIES.iter() {
            println!("{:<10} {:<16} {}", ability.id, ability.name, describe(ability));
        }
        return Ok(());
    }

    let base = match &args.config {
        Some(path) => SimConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::default(),
    };
    let config = args.apply(base);

    let mut last: Option<GameReport> = None;
    let summary = simulate_with(&config, |report| last = Some(report.clone()))
        .context("simulation failed")?;

    println!(
        "{} games: {} player wins, {} AI wins, {} draws, {} timeouts, {:.1} turns on average",
        summary.games,
        summary.player_wins,
        summary.ai_wins,
        summary.draws,
        summary.timeouts,
        summary.average_turns()
    );

    if let Some(report) = &last {
        if args.log_turns {
            println!("--- game {} (seed {}) ---", report.index, report.seed);
            for entry in &report.log {
                println!("[{}] {}", entry.id(), entry.message);
            }
        }

        if let Some(path) = &args.output {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &report.log)
                .with_context(|| format!("writing log to {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote game log");
        }
    }

    Ok(())
}
