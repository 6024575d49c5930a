//! Errors raised by turn resolution.
//!
//! All of them are synchronous and non-retryable: the call that produced them
//! changed nothing, and the caller decides whether to abort the duel or
//! substitute a fallback action.

use crate::types::{AbilityId, Side};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DuelError {
    /// The committed ability is not among the options offered to that side.
    #[error("{side} selected {ability}, which is not among the offered options")]
    InvalidSelection { side: Side, ability: AbilityId },

    /// A string id that names no catalog ability.
    #[error("unknown ability id `{0}`")]
    UnknownAbility(String),

    /// A combatant entered the turn outside `0..=max_hp` (or with no max).
    #[error("{side} entered the turn with hp {hp}/{max_hp}")]
    InvariantViolation { side: Side, hp: u32, max_hp: u32 },
}

/// How an error should be treated by the surrounding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Bad input from the caller; fix the input, do not retry as-is.
    Validation,
    /// State the engine itself never produces; indicates a caller bug.
    Internal,
}

impl DuelError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidSelection { .. } | Self::UnknownAbility(_) => ErrorSeverity::Validation,
            Self::InvariantViolation { .. } => ErrorSeverity::Internal,
        }
    }
}
