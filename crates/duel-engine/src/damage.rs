use crate::status::StatusEffects;

/// Result of running raw damage through a target's defences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mitigation {
    pub amount: u32,
    pub dodged: bool,
    /// Damage soaked up by blocks.
    pub absorbed: u32,
}

impl Mitigation {
    pub fn negated(&self) -> bool {
        self.amount == 0
    }
}

/// Reduce raw damage by the target's current effects.
///
/// A dodge negates everything; otherwise every block's power is subtracted,
/// never going below zero.
pub fn apply_mitigation(raw: u32, target: &StatusEffects) -> Mitigation {
    if target.has_dodge() {
        return Mitigation {
            amount: 0,
            dodged: true,
            absorbed: 0,
        };
    }

    let block = target.total_block();
    let amount = raw.saturating_sub(block);
    Mitigation {
        amount,
        dodged: false,
        absorbed: raw - amount,
    }
}

/// Clamp a running HP total into `[0, max_hp]`.
pub fn clamp_hp(raw: i64, max_hp: u32) -> u32 {
    raw.clamp(0, max_hp as i64) as u32
}
