//! Turn resolution for two-combatant, simultaneous-move duels.
//!
//! Each turn both sides commit one ability from the options they were offered;
//! [`resolve_turn`] settles the outcome and hands back fresh combatants plus a
//! structured log. Between turns the caller runs [`decay`] on both sides.

pub mod abilities;
pub mod combat;
pub mod constants;
pub mod damage;
pub mod error;
pub mod log;
pub mod roll;
pub mod status;
pub mod types;

pub use abilities::{ability_by_name, get_ability, ABILITIES};
pub use combat::resolve_turn;
pub use error::{DuelError, ErrorSeverity};
pub use log::{LogEntry, LogKind, TurnEvent};
pub use roll::{GameRng, RollSource, ScriptedRolls};
pub use status::{decay, decay_with_expired, StatusEffect, StatusEffects, StatusKind};
pub use types::{
    Ability, AbilityId, AbilityKind, Combatant, Outcome, Side, SideReport, TurnAction, TurnResult,
};
