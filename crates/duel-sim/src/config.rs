//! JSON configuration for batch simulation
//!
//! Every field has a default, so `{}` is a valid config file.

use std::path::Path;

use duel_engine::constants::{DEFAULT_MAX_HP, OPTIONS_PER_TURN};
use duel_engine::{AbilityId, ABILITIES};
use serde::{Deserialize, Serialize};

use crate::chooser::Policy;
use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of duels to play
    pub games: u32,
    /// Turns before a duel is called off as a timeout
    pub max_turns: u32,
    /// Starting (and maximum) HP for both sides
    pub max_hp: u32,
    /// Base seed; each game derives its own from it.
    /// Without one, a fresh seed is drawn and logged.
    pub seed: Option<u64>,
    pub player_policy: Policy,
    pub ai_policy: Policy,
    pub player_name: String,
    pub ai_name: String,
    /// Abilities that are never offered to either side
    pub banned: Vec<AbilityId>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 100,
            max_turns: 50,
            max_hp: DEFAULT_MAX_HP,
            seed: None,
            player_policy: Policy::Greedy,
            ai_policy: Policy::Heuristic,
            player_name: "Player".to_string(),
            ai_name: "AI".to_string(),
            banned: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Load and validate a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.games == 0 {
            return Err(SimError::InvalidConfig("games must be at least 1".to_string()));
        }
        if self.max_turns == 0 {
            return Err(SimError::InvalidConfig("max_turns must be at least 1".to_string()));
        }
        if self.max_hp == 0 {
            return Err(SimError::InvalidConfig("max_hp must be at least 1".to_string()));
        }

        let available = ABILITIES
            .iter()
            .filter(|a| !self.banned.contains(&a.id))
            .count();
        if available < OPTIONS_PER_TURN {
            return Err(SimError::InvalidConfig(format!(
                "banning {} abilities leaves {} to offer, need {}",
                self.banned.len(),
                available,
                OPTIONS_PER_TURN
            )));
        }
        Ok(())
    }
}
