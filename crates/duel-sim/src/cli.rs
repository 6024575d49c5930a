//! Command-line interface for the duel simulator

use std::path::PathBuf;

use clap::Parser;

use crate::chooser::Policy;
use crate::config::SimConfig;

/// Headless duel simulator
#[derive(Parser, Debug)]
#[command(name = "duel-sim")]
#[command(about = "Play batches of seeded duels and report the results")]
#[command(version)]
pub struct Args {
    /// JSON config file; command-line flags override its fields
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Number of duels to play
    #[arg(long)]
    pub games: Option<u32>,

    /// Base seed for reproducible batches
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn limit before a duel times out
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Chooser for the player side (heuristic, greedy, first)
    #[arg(long)]
    pub player_policy: Option<Policy>,

    /// Chooser for the AI side (heuristic, greedy, first)
    #[arg(long)]
    pub ai_policy: Option<Policy>,

    /// Print the last game's turn log
    #[arg(long)]
    pub log_turns: bool,

    /// Write the last game's log as JSON
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Print the ability catalog and exit
    #[arg(long)]
    pub list_abilities: bool,
}

impl Args {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: SimConfig) -> SimConfig {
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(policy) = self.player_policy {
            config.player_policy = policy;
        }
        if let Some(policy) = self.ai_policy {
            config.ai_policy = policy;
        }
        config
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
