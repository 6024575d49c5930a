//! Status effects and the once-per-turn decay pass.
//!
//! The engine creates effects while resolving a turn; only [`decay`] removes
//! them by expiry. Durations are read by the engine *before* decay runs, which
//! is what lets Freeze and Poison tell "applied this turn" apart from
//! "applied last turn".

use strum::EnumDiscriminants;

use crate::constants::{FREEZE_DURATION, POISON_DURATION};
use crate::types::Combatant;

/// A timed modifier attached to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(StatusKind), derive(Hash, strum::Display))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    strum_discriminants(derive(serde::Serialize, serde::Deserialize))
)]
pub enum StatusEffect {
    /// Flat damage reduction. Several blocks may coexist; their powers sum.
    Block { power: u32, remaining_turns: u32 },
    /// Negates all incoming directional damage, regardless of blocks.
    Dodge { remaining_turns: u32 },
    /// Damage at the end of every turn after the one it was applied on.
    Poison { power: u32, remaining_turns: u32 },
    /// Blocks healing received once it is no longer fresh.
    Freeze { remaining_turns: u32 },
    /// The holder's action was nullified this turn.
    Stun { remaining_turns: u32 },
}

impl StatusEffect {
    pub fn kind(&self) -> StatusKind {
        StatusKind::from(self)
    }

    pub fn remaining_turns(&self) -> u32 {
        match *self {
            Self::Block { remaining_turns, .. }
            | Self::Dodge { remaining_turns }
            | Self::Poison { remaining_turns, .. }
            | Self::Freeze { remaining_turns }
            | Self::Stun { remaining_turns } => remaining_turns,
        }
    }

    fn remaining_turns_mut(&mut self) -> &mut u32 {
        match self {
            Self::Block { remaining_turns, .. }
            | Self::Dodge { remaining_turns }
            | Self::Poison { remaining_turns, .. }
            | Self::Freeze { remaining_turns }
            | Self::Stun { remaining_turns } => remaining_turns,
        }
    }
}

/// What happened when poison was applied to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoisonApplication {
    Created,
    Refreshed,
}

/// Ordered set of effects held by one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.effects.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn has_dodge(&self) -> bool {
        self.has(StatusKind::Dodge)
    }

    pub fn is_stunned(&self) -> bool {
        self.has(StatusKind::Stun)
    }

    /// Sum of every active block's power.
    pub fn total_block(&self) -> u32 {
        self.effects
            .iter()
            .map(|e| match *e {
                StatusEffect::Block { power, .. } => power,
                _ => 0,
            })
            .fold(0, u32::saturating_add)
    }

    /// True when a freeze applied on an earlier turn is still held.
    ///
    /// A freeze landing this turn still carries its full duration and does
    /// not block anything until the next turn.
    pub fn is_frozen(&self) -> bool {
        self.effects.iter().any(|e| {
            matches!(*e, StatusEffect::Freeze { remaining_turns } if remaining_turns < FREEZE_DURATION)
        })
    }

    /// True when the held freeze blocks healing now but none will remain
    /// after the next decay.
    pub fn is_thawing(&self) -> bool {
        self.is_frozen()
            && self.effects.iter().all(|e| match *e {
                StatusEffect::Freeze { remaining_turns } => remaining_turns <= 1,
                _ => true,
            })
    }

    pub fn poison(&self) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind() == StatusKind::Poison)
    }

    /// Poison effects that were established before this turn and so tick now.
    pub fn ticking_poison(&self) -> impl Iterator<Item = u32> + '_ {
        self.effects.iter().filter_map(|e| match *e {
            StatusEffect::Poison {
                power,
                remaining_turns,
            } if remaining_turns < POISON_DURATION => Some(power),
            _ => None,
        })
    }

    /// Adds poison, or resets the existing one to a full duration.
    ///
    /// The existing instance keeps its power; a combatant never holds two.
    pub fn refresh_or_add_poison(&mut self, power: u32) -> PoisonApplication {
        if let Some(existing) = self
            .effects
            .iter_mut()
            .find(|e| e.kind() == StatusKind::Poison)
        {
            *existing.remaining_turns_mut() = POISON_DURATION;
            return PoisonApplication::Refreshed;
        }

        self.effects.push(StatusEffect::Poison {
            power,
            remaining_turns: POISON_DURATION,
        });
        PoisonApplication::Created
    }

    /// Decrements every duration and drops the ones reaching zero.
    ///
    /// Returns the effects that expired.
    pub fn decay(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            let turns = effect.remaining_turns_mut();
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<I: IntoIterator<Item = StatusEffect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

/// Applies the post-turn decay to a copy of `combatant`.
///
/// Call once per completed turn for each side, after `resolve_turn`.
pub fn decay(combatant: &Combatant) -> Combatant {
    decay_with_expired(combatant).0
}

/// Like [`decay`], also returning the effects that expired.
pub fn decay_with_expired(combatant: &Combatant) -> (Combatant, Vec<StatusEffect>) {
    let mut next = combatant.clone();
    let expired = next.status_effects.decay();
    (next, expired)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(list: &[StatusEffect]) -> StatusEffects {
        list.iter().copied().collect()
    }

    #[test]
    fn decay_decrements_and_prunes() {
        let mut set = effects(&[
            StatusEffect::Block { power: 4, remaining_turns: 1 },
            StatusEffect::Poison { power: 2, remaining_turns: 3 },
            StatusEffect::Freeze { remaining_turns: 2 },
        ]);

        let expired = set.decay();

        assert_eq!(expired, vec![StatusEffect::Block { power: 4, remaining_turns: 0 }]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.poison().map(StatusEffect::remaining_turns), Some(2));
        assert!(set.is_frozen());
    }

    #[test]
    fn decay_never_increases_durations() {
        let before = effects(&[
            StatusEffect::Dodge { remaining_turns: 5 },
            StatusEffect::Stun { remaining_turns: 0 },
            StatusEffect::Poison { power: 2, remaining_turns: 1 },
        ]);
        let mut after = before.clone();
        after.decay();

        assert!(after.iter().all(|e| e.remaining_turns() > 0));
        for effect in after.iter() {
            let original = before
                .iter()
                .find(|b| b.kind() == effect.kind())
                .map(StatusEffect::remaining_turns)
                .unwrap();
            assert!(effect.remaining_turns() < original);
        }
        assert!(!after.is_stunned());
        assert!(after.poison().is_none());
    }

    #[test]
    fn decay_leaves_caller_copy_untouched() {
        let mut fighter = Combatant::new("Riven", 20);
        fighter.status_effects.push(StatusEffect::Dodge { remaining_turns: 1 });

        let (next, expired) = decay_with_expired(&fighter);

        assert!(fighter.status_effects.has_dodge());
        assert!(next.status_effects.is_empty());
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].kind(), StatusKind::Dodge);
    }

    #[test]
    fn blocks_stack() {
        let set = effects(&[
            StatusEffect::Block { power: 4, remaining_turns: 1 },
            StatusEffect::Block { power: 3, remaining_turns: 1 },
            StatusEffect::Dodge { remaining_turns: 1 },
        ]);
        assert_eq!(set.total_block(), 7);
        assert_eq!(set.count(StatusKind::Block), 2);
    }

    #[test]
    fn poison_refresh_resets_duration_without_stacking() {
        let mut set = StatusEffects::new();
        assert_eq!(set.refresh_or_add_poison(2), PoisonApplication::Created);
        set.decay();
        assert_eq!(set.poison().map(StatusEffect::remaining_turns), Some(2));

        assert_eq!(set.refresh_or_add_poison(5), PoisonApplication::Refreshed);
        assert_eq!(set.count(StatusKind::Poison), 1);
        assert_eq!(
            set.poison(),
            Some(&StatusEffect::Poison { power: 2, remaining_turns: POISON_DURATION })
        );
    }

    #[test]
    fn fresh_poison_does_not_tick() {
        let mut set = StatusEffects::new();
        set.refresh_or_add_poison(2);
        assert_eq!(set.ticking_poison().count(), 0);

        set.decay();
        assert_eq!(set.ticking_poison().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn freeze_blocks_only_after_first_decay() {
        let mut set = effects(&[StatusEffect::Freeze { remaining_turns: FREEZE_DURATION }]);
        assert!(!set.is_frozen());

        set.decay();
        assert!(set.is_frozen());

        set.decay();
        assert!(!set.is_frozen());
        assert!(set.is_empty());
    }

    #[test]
    fn refrozen_holder_is_not_thawing() {
        let mut set = effects(&[StatusEffect::Freeze { remaining_turns: 1 }]);
        assert!(set.is_thawing());

        set.push(StatusEffect::Freeze { remaining_turns: FREEZE_DURATION });
        assert!(set.is_frozen());
        assert!(!set.is_thawing());
    }

    #[test]
    fn huge_stacked_blocks_saturate() {
        let set = effects(&[
            StatusEffect::Block { power: u32::MAX, remaining_turns: 1 },
            StatusEffect::Block { power: 5, remaining_turns: 1 },
        ]);
        assert_eq!(set.total_block(), u32::MAX);
    }
}
