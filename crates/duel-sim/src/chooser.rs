//! Move selection for both sides of a headless duel.
//!
//! A chooser only sees a [`DuelView`] and answers with a string id plus a
//! rationale, the same shape a remote reasoning service would return. The
//! driver then maps that answer back onto an offered ability with
//! [`resolve_choice`], so a bad answer never aborts a duel.

use std::str::FromStr;

use duel_engine::{ability_by_name, Ability, AbilityKind, Combatant, GameRng, LogEntry};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What one side is allowed to know when picking its move.
#[derive(Clone, Copy, Debug)]
pub struct DuelView<'a> {
    pub turn: u32,
    pub me: &'a Combatant,
    pub foe: &'a Combatant,
    pub offered: &'a [Ability],
    /// What the opponent may pick from this turn.
    pub foe_offered: &'a [Ability],
    /// Everything logged so far, oldest first.
    pub log: &'a [LogEntry],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveChoice {
    pub ability_id: String,
    pub rationale: String,
}

impl MoveChoice {
    fn new(ability: &Ability, rationale: &str) -> Self {
        Self {
            ability_id: ability.id.to_string(),
            rationale: rationale.to_string(),
        }
    }
}

pub trait MoveChooser {
    fn name(&self) -> &'static str;

    fn choose(&mut self, view: &DuelView<'_>, rng: &mut GameRng) -> MoveChoice;
}

/// Built-in chooser selectable from config and the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Heuristic,
    Greedy,
    First,
}

impl Policy {
    pub fn chooser(self) -> Box<dyn MoveChooser> {
        match self {
            Policy::Heuristic => Box::new(HeuristicChooser),
            Policy::Greedy => Box::new(GreedyChooser),
            Policy::First => Box::new(FirstOptionChooser),
        }
    }
}

/// Scripted opponent: survive, finish, control, defend, then pressure.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicChooser;

const LOW_HP: u32 = 3;

impl MoveChooser for HeuristicChooser {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn choose(&mut self, view: &DuelView<'_>, rng: &mut GameRng) -> MoveChoice {
        let offered = view.offered;
        let find = |kind: AbilityKind| offered.iter().find(|a| a.kind == kind);

        if view.me.hp <= LOW_HP {
            if let Some(heal) = find(AbilityKind::Heal) {
                return MoveChoice::new(heal, "Critically low HP, healing before anything else.");
            }
        }

        if view.foe.hp <= LOW_HP {
            if let Some(finisher) = strongest(offered.iter().filter(|a| a.kind == AbilityKind::Damage)) {
                return MoveChoice::new(finisher, "Opponent is nearly down, going for the finishing blow.");
            }
        }

        if !view.foe.status_effects.is_stunned() {
            if let Some(stun) = find(AbilityKind::Stun) {
                return MoveChoice::new(stun, "Stunning denies the opponent's whole turn.");
            }
        }

        if let Some(block) = find(AbilityKind::Block) {
            return MoveChoice::new(block, "Blocking to blunt whatever comes in.");
        }

        let attacks: Vec<&Ability> = offered
            .iter()
            .filter(|a| matches!(a.kind, AbilityKind::Damage | AbilityKind::Drain))
            .collect();
        match attacks.choose(rng.rng_mut()) {
            Some(attack) => MoveChoice::new(attack, "Keeping up steady pressure."),
            None => match offered.first() {
                Some(first) => MoveChoice::new(first, "Nothing stands out, taking the first option."),
                None => MoveChoice {
                    ability_id: String::new(),
                    rationale: "No options offered.".to_string(),
                },
            },
        }
    }
}

/// Always the hardest-hitting offensive option.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyChooser;

impl MoveChooser for GreedyChooser {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose(&mut self, view: &DuelView<'_>, _rng: &mut GameRng) -> MoveChoice {
        let pick = strongest(view.offered.iter().filter(|a| a.kind.is_offensive()))
            .or_else(|| view.offered.first());
        match pick {
            Some(ability) => MoveChoice::new(ability, "Highest damage on offer."),
            None => MoveChoice {
                ability_id: String::new(),
                rationale: "No options offered.".to_string(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOptionChooser;

impl MoveChooser for FirstOptionChooser {
    fn name(&self) -> &'static str {
        "first"
    }

    fn choose(&mut self, view: &DuelView<'_>, _rng: &mut GameRng) -> MoveChoice {
        MoveChoice {
            ability_id: view
                .offered
                .first()
                .map(|a| a.id.to_string())
                .unwrap_or_default(),
            rationale: "First option.".to_string(),
        }
    }
}

/// Highest power wins; the earliest entry wins ties.
fn strongest<'a>(abilities: impl Iterator<Item = &'a Ability>) -> Option<&'a Ability> {
    abilities.fold(None, |best: Option<&Ability>, a| match best {
        Some(b) if b.power >= a.power => Some(b),
        _ => Some(a),
    })
}

/// Maps a chooser's answer onto one of the offered abilities.
///
/// Unknown ids and ids that were not offered fall back to the first offer.
/// Returns `None` only when nothing was offered.
pub fn resolve_choice(choice: &MoveChoice, offered: &[Ability]) -> Option<Ability> {
    let picked = ability_by_name(choice.ability_id.trim())
        .ok()
        .and_then(|ability| offered.iter().find(|a| a.id == ability.id));

    match picked {
        Some(ability) => Some(*ability),
        None => {
            let fallback = offered.first().copied();
            tracing::warn!(
                requested = %choice.ability_id,
                fallback = ?fallback.map(|a| a.id),
                "chooser picked an ability that was not offered"
            );
            fallback
        }
    }
}

impl FromStr for MoveChoice {
    type Err = serde_json::Error;

    /// Parses a `{"ability_id": .., "rationale": ..}` reply.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(raw)
    }
}
