//! Rule numbers shared by the ability catalog and the turn resolver.

/// Hit points every combatant starts a standard duel with.
pub const DEFAULT_MAX_HP: u32 = 20;

/// Abilities offered to each side at the start of a turn.
pub const OPTIONS_PER_TURN: usize = 3;

// ---------------------------------------------------------------------------
// Status durations (in turns, counted before the post-turn decay)
// ---------------------------------------------------------------------------

pub const BLOCK_DURATION: u32 = 1;
pub const DODGE_DURATION: u32 = 1;
pub const STUN_DURATION: u32 = 1;

/// Poison is applied (or refreshed) with this many turns remaining. A poison
/// only ticks once its remaining turns have dropped below this value, so the
/// turn it lands on is tick-free.
pub const POISON_DURATION: u32 = 3;
pub const POISON_POWER: u32 = 2;

/// Freeze lands with two turns so that, after the end-of-turn decay, exactly
/// one heal-blocking turn is left. Healing is blocked while the remaining
/// turns are below this value.
pub const FREEZE_DURATION: u32 = 2;

// ---------------------------------------------------------------------------
// Named ability rules
// ---------------------------------------------------------------------------

/// Unmitigated damage a Berserker Rage user deals to itself.
pub const RAGE_SELF_DAMAGE: u32 = 2;

/// Probability that a Fireball aimed at an unstunned target misses.
pub const FIREBALL_MISS_CHANCE: f64 = 0.5;
