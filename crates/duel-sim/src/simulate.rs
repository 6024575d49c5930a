//! Batch simulation over many seeded duels.

use duel_engine::{Combatant, GameRng, LogEntry, Outcome};
use serde::Serialize;

use crate::config::SimConfig;
use crate::duel::{Duel, DuelStatus};
use crate::error::SimError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub games: u32,
    pub player_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
    pub timeouts: u32,
    /// Turns played across all games
    pub total_turns: u64,
}

impl SimulationSummary {
    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    fn record(&mut self, report: &GameReport) {
        self.games += 1;
        self.total_turns += report.turns as u64;
        match report.status {
            DuelStatus::Finished(Outcome::PlayerWins) => self.player_wins += 1,
            DuelStatus::Finished(Outcome::AiWins) => self.ai_wins += 1,
            DuelStatus::Finished(Outcome::Draw) => self.draws += 1,
            // run() never stops on an ongoing duel without reporting a timeout
            DuelStatus::Finished(Outcome::Ongoing) | DuelStatus::Timeout => self.timeouts += 1,
        }
    }
}

/// Result of a single simulated duel.
#[derive(Clone, Debug)]
pub struct GameReport {
    pub index: u32,
    pub seed: u64,
    pub status: DuelStatus,
    pub turns: u32,
    pub log: Vec<LogEntry>,
}

/// Seed for game `index`, derived from the batch's base seed.
pub fn game_seed(base: u64, index: u32) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Plays one duel with the given seed.
pub fn play_game(config: &SimConfig, index: u32, seed: u64) -> Result<GameReport, SimError> {
    let mut duel = Duel::with_banned(
        Combatant::new(config.player_name.clone(), config.max_hp),
        Combatant::new(config.ai_name.clone(), config.max_hp),
        GameRng::from_seed(seed),
        config.banned.clone(),
    );
    let mut player = config.player_policy.chooser();
    let mut ai = config.ai_policy.chooser();

    let status = duel.run(player.as_mut(), ai.as_mut(), config.max_turns)?;
    let turns = duel.turn();
    tracing::debug!(index, seed, turns, ?status, "game finished");

    Ok(GameReport {
        index,
        seed,
        status,
        turns,
        log: duel.into_log(),
    })
}

/// Runs every game in `config`, reporting each one to `on_game` as it ends.
pub fn simulate_with(
    config: &SimConfig,
    mut on_game: impl FnMut(&GameReport),
) -> Result<SimulationSummary, SimError> {
    config.validate()?;

    let base = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        games = config.games,
        base_seed = base,
        player = %config.player_policy,
        ai = %config.ai_policy,
        "starting simulation"
    );

    let mut summary = SimulationSummary::default();
    for index in 0..config.games {
        let report = play_game(config, index, game_seed(base, index))?;
        summary.record(&report);
        on_game(&report);
    }

    tracing::info!(
        player_wins = summary.player_wins,
        ai_wins = summary.ai_wins,
        draws = summary.draws,
        timeouts = summary.timeouts,
        "simulation complete"
    );
    Ok(summary)
}

pub fn simulate(config: &SimConfig) -> Result<SimulationSummary, SimError> {
    simulate_with(config, |_| {})
}
