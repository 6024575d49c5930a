//! Turn log.
//!
//! Every entry carries a typed [`TurnEvent`] with the structured facts, plus a
//! rendered message for display. Consumers filter on `kind` / `event` and
//! never need to parse `message`.

use strum::Display;

use crate::status::StatusKind;
use crate::types::{AbilityId, Side};

/// Coarse category used by presentation layers to group entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogKind {
    Action,
    Damage,
    Heal,
    Status,
    System,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEvent {
    /// Both sides picked a stun; neither action happens.
    MutualStun,
    ActionUsed { side: Side, ability: AbilityId },
    /// The side's committed action was discarded by the opponent's stun.
    ActionCancelled { side: Side, ability: AbilityId },
    BlockRaised { side: Side, power: u32 },
    DodgeReady { side: Side },
    PoisonApplied { target: Side, power: u32, turns: u32 },
    PoisonRefreshed { target: Side, turns: u32 },
    FreezeApplied { target: Side },
    FireballMissed { side: Side },
    Damage { target: Side, amount: u32, source: AbilityId },
    /// Incoming damage fully absorbed by a dodge or by blocks. `absorbed` is
    /// the amount soaked by blocks, zero for a dodge.
    DamageNegated {
        target: Side,
        source: AbilityId,
        dodged: bool,
        absorbed: u32,
    },
    Heal { side: Side, amount: u32, source: AbilityId },
    HealBlocked { side: Side },
    /// A drain dealt nothing and so restored nothing.
    DrainFizzled { side: Side },
    SelfDamage { side: Side, amount: u32, source: AbilityId },
    PoisonTick { side: Side, amount: u32 },
    /// The freeze blocking this side's healing expires after this turn.
    Thawing { side: Side },
    FinalHp { side: Side, hp: u32, max_hp: u32 },
    /// An effect ran out in the decay that follows a turn.
    EffectExpired { side: Side, kind: StatusKind },
    DuelStarted,
    /// `winner` is `None` for a draw.
    DuelOver { winner: Option<Side> },
    DuelTimedOut { turns: u32 },
}

impl TurnEvent {
    pub fn kind(&self) -> LogKind {
        match self {
            Self::ActionUsed { .. } => LogKind::Action,
            Self::Damage { .. } | Self::SelfDamage { .. } | Self::PoisonTick { .. } => {
                LogKind::Damage
            }
            Self::Heal { .. } => LogKind::Heal,
            Self::FinalHp { .. }
            | Self::EffectExpired { .. }
            | Self::DuelStarted
            | Self::DuelOver { .. }
            | Self::DuelTimedOut { .. } => LogKind::System,
            Self::MutualStun
            | Self::ActionCancelled { .. }
            | Self::BlockRaised { .. }
            | Self::DodgeReady { .. }
            | Self::PoisonApplied { .. }
            | Self::PoisonRefreshed { .. }
            | Self::FreezeApplied { .. }
            | Self::FireballMissed { .. }
            | Self::DamageNegated { .. }
            | Self::HealBlocked { .. }
            | Self::DrainFizzled { .. }
            | Self::Thawing { .. } => LogKind::Status,
        }
    }

    /// Status kind this event adds to a combatant, if any.
    pub fn gained_status(&self) -> Option<(Side, StatusKind)> {
        match *self {
            Self::BlockRaised { side, .. } => Some((side, StatusKind::Block)),
            Self::DodgeReady { side } => Some((side, StatusKind::Dodge)),
            Self::PoisonApplied { target, .. } => Some((target, StatusKind::Poison)),
            Self::FreezeApplied { target } => Some((target, StatusKind::Freeze)),
            Self::ActionCancelled { side, .. } => Some((side, StatusKind::Stun)),
            _ => None,
        }
    }

    fn render(&self, names: &Names<'_>) -> String {
        match *self {
            Self::MutualStun => format!(
                "Both {} and {} are stunned and cannot act this turn!",
                names.player, names.ai
            ),
            Self::ActionUsed { side, ability } => {
                format!("{} uses {}!", names.of(side), ability_label(ability))
            }
            Self::ActionCancelled { side, .. } => {
                format!("{} is stunned and cannot act this turn!", names.of(side))
            }
            Self::BlockRaised { side, power } => format!(
                "{} prepares to block {} damage for 1 turn!",
                names.of(side),
                power
            ),
            Self::DodgeReady { side } => format!("{} prepares to dodge!", names.of(side)),
            Self::PoisonApplied {
                target,
                power,
                turns,
            } => format!(
                "{} is poisoned for {} turns ({} damage/turn)!",
                names.of(target),
                turns,
                power
            ),
            Self::PoisonRefreshed { target, turns } => format!(
                "{}'s poison is refreshed to {} turns!",
                names.of(target),
                turns
            ),
            Self::FreezeApplied { target } => format!(
                "{} is frozen and cannot heal next turn!",
                names.of(target)
            ),
            Self::FireballMissed { side } => format!("{}'s fireball misses!", names.of(side)),
            Self::Damage {
                target,
                amount,
                source,
            } => format!(
                "{} takes {} damage from {}!",
                names.of(target),
                amount,
                ability_label(source)
            ),
            Self::DamageNegated {
                target,
                dodged,
                absorbed,
                ..
            } => {
                if dodged {
                    format!("{} dodges the attack!", names.of(target))
                } else {
                    format!("{} blocks the attack ({} absorbed)!", names.of(target), absorbed)
                }
            }
            Self::Heal { side, amount, .. } => {
                format!("{} heals for {} HP!", names.of(side), amount)
            }
            Self::HealBlocked { side } => {
                format!("{}'s healing is blocked by freeze!", names.of(side))
            }
            Self::DrainFizzled { side } => format!(
                "{}'s drain was blocked and no healing occurred!",
                names.of(side)
            ),
            Self::SelfDamage {
                side,
                amount,
                source,
            } => format!(
                "{} takes {} damage from {}!",
                names.of(side),
                amount,
                ability_label(source)
            ),
            Self::PoisonTick { side, amount } => {
                format!("{} takes {} poison damage!", names.of(side), amount)
            }
            Self::Thawing { side } => format!("{} is no longer frozen!", names.of(side)),
            Self::FinalHp { side, hp, max_hp } => format!(
                "{} HP at end of turn: {}/{}",
                names.of(side),
                hp,
                max_hp
            ),
            Self::EffectExpired { side, kind } => {
                format!("{}'s {} wears off.", names.of(side), kind)
            }
            Self::DuelStarted => format!(
                "{} faces {}. Abilities will surface each turn!",
                names.player, names.ai
            ),
            Self::DuelOver { winner: Some(side) } => {
                format!("Game Over! {} wins!", names.of(side))
            }
            Self::DuelOver { winner: None } => "Game Over! It's a draw!".to_string(),
            Self::DuelTimedOut { turns } => {
                format!("The duel is called off after {turns} turns.")
            }
        }
    }
}

fn ability_label(id: AbilityId) -> &'static str {
    crate::abilities::get_ability(id).name
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    /// Position within the turn, starting at 0.
    pub seq: u32,
    pub kind: LogKind,
    pub event: TurnEvent,
    pub message: String,
}

impl LogEntry {
    /// Stable identifier, unique across a duel's accumulated log.
    pub fn id(&self) -> String {
        format!("{}-{}", self.turn, self.seq)
    }
}

struct Names<'a> {
    player: &'a str,
    ai: &'a str,
}

impl<'a> Names<'a> {
    fn of(&self, side: Side) -> &'a str {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }
}

/// Collects the entries for one turn in order.
pub struct TurnLog<'a> {
    turn: u32,
    first_seq: u32,
    names: Names<'a>,
    entries: Vec<LogEntry>,
}

impl<'a> TurnLog<'a> {
    pub fn new(turn: u32, player_name: &'a str, ai_name: &'a str) -> Self {
        Self::resume(turn, player_name, ai_name, 0)
    }

    /// Continues a turn whose first `next_seq` entries were already recorded,
    /// keeping entry ids unique.
    pub fn resume(turn: u32, player_name: &'a str, ai_name: &'a str, next_seq: u32) -> Self {
        Self {
            turn,
            first_seq: next_seq,
            names: Names {
                player: player_name,
                ai: ai_name,
            },
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, event: TurnEvent) {
        let message = event.render(&self.names);
        tracing::trace!(turn = self.turn, %message, "log");
        self.entries.push(LogEntry {
            turn: self.turn,
            seq: self.first_seq + self.entries.len() as u32,
            kind: event.kind(),
            event,
            message,
        });
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

/// Entries of one kind, in order.
pub fn filter_by_kind(entries: &[LogEntry], kind: LogKind) -> Vec<&LogEntry> {
    entries.iter().filter(|e| e.kind == kind).collect()
}

/// Entries belonging to one turn, in order.
pub fn entries_for_turn(entries: &[LogEntry], turn: u32) -> Vec<&LogEntry> {
    entries.iter().filter(|e| e.turn == turn).collect()
}
