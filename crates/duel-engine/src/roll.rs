//! Injected randomness.
//!
//! The resolver never reaches for a global RNG; every chance-based rule asks
//! the [`RollSource`] it was given, so a fixed seed (or a scripted sequence)
//! makes a turn fully reproducible.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RollSource {
    /// Returns true with probability `chance` (clamped to `0.0..=1.0`).
    fn roll(&mut self, chance: f64) -> bool;
}

/// Seeded random source for duels and simulations.
///
/// The same seed always yields the same sequence of rolls and offers.
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Access to the underlying generator, e.g. for shuffling offers.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl RollSource for GameRng {
    fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen_bool(chance.clamp(0.0, 1.0))
    }
}

/// Pre-supplied roll outcomes, consumed in order.
///
/// Once exhausted every further roll fails.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    outcomes: VecDeque<bool>,
    consumed: usize,
}

impl ScriptedRolls {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of rolls taken so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self, _chance: f64) -> bool {
        self.consumed += 1;
        self.outcomes.pop_front().unwrap_or(false)
    }
}
