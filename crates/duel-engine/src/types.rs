use strum::{Display, EnumIter, EnumString};

use crate::log::LogEntry;
use crate::status::{StatusEffect, StatusEffects, StatusKind};

/// Catalog key of an ability.
///
/// Most abilities resolve purely from their [`AbilityKind`]; the id is only
/// consulted for the few named rules (Fireball accuracy, Rage recoil).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AbilityId {
    Strike,
    Heal,
    Block,
    Stun,
    Drain,
    Fireball,
    Dodge,
    Poison,
    Rage,
    Lifesteal,
    Freeze,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    Damage,
    Heal,
    Block,
    Stun,
    Drain,
    Dodge,
    Poison,
    Freeze,
}

impl AbilityKind {
    /// Kinds that send damage at the opponent.
    pub fn is_offensive(self) -> bool {
        matches!(
            self,
            Self::Damage | Self::Stun | Self::Drain | Self::Poison | Self::Freeze
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: &'static str,
    pub kind: AbilityKind,
    pub power: u32,
}

/// Which side of the duel a combatant, event or report belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// One side of a duel. Owned by the caller between turns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    /// Display name, only used to phrase log messages.
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub status_effects: StatusEffects,
}

impl Combatant {
    /// A combatant at full health with no effects.
    pub fn new(name: impl Into<String>, max_hp: u32) -> Self {
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            status_effects: StatusEffects::new(),
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_status(mut self, effect: StatusEffect) -> Self {
        self.status_effects.push(effect);
        self
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }
}

/// A committed ability together with the options it was picked from.
#[derive(Clone, Copy, Debug)]
pub struct TurnAction<'a> {
    pub offered: &'a [Ability],
    pub choice: AbilityId,
}

impl<'a> TurnAction<'a> {
    pub fn new(offered: &'a [Ability], choice: AbilityId) -> Self {
        Self { offered, choice }
    }
}

/// Structured per-side facts about a resolved turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideReport {
    /// Ability this side committed, whether or not it executed.
    pub action: Option<AbilityId>,
    /// The action was discarded by an opposing stun.
    pub cancelled: bool,
    /// Damage received from the opponent's action after mitigation.
    pub damage_taken: u32,
    /// Healing actually applied (zero when blocked by freeze).
    pub healed: u32,
    pub heal_blocked: bool,
    pub self_damage: u32,
    pub poison_damage: u32,
    /// This side's own Fireball missed.
    pub missed: bool,
    /// Effects this side gained during the turn.
    pub gained: Vec<StatusKind>,
}

/// Terminal state of a duel after a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Ongoing,
    PlayerWins,
    AiWins,
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::PlayerWins => Some(Side::Player),
            Outcome::AiWins => Some(Side::Ai),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TurnResult {
    pub turn: u32,
    pub player: Combatant,
    pub ai: Combatant,
    pub log: Vec<LogEntry>,
    pub player_report: SideReport,
    pub ai_report: SideReport,
    /// HP right before the final clamp; may be negative or above max.
    pub player_hp_before_clamp: i64,
    pub ai_hp_before_clamp: i64,
}

impl TurnResult {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn report(&self, side: Side) -> &SideReport {
        match side {
            Side::Player => &self.player_report,
            Side::Ai => &self.ai_report,
        }
    }

    /// Termination check for the caller.
    ///
    /// A double knockout goes to whoever was less far below zero before the
    /// clamp; identical totals are a draw.
    pub fn outcome(&self) -> Outcome {
        match (self.player.is_down(), self.ai.is_down()) {
            (false, false) => Outcome::Ongoing,
            (false, true) => Outcome::PlayerWins,
            (true, false) => Outcome::AiWins,
            (true, true) => {
                match self.player_hp_before_clamp.cmp(&self.ai_hp_before_clamp) {
                    std::cmp::Ordering::Greater => Outcome::PlayerWins,
                    std::cmp::Ordering::Less => Outcome::AiWins,
                    std::cmp::Ordering::Equal => Outcome::Draw,
                }
            }
        }
    }
}
