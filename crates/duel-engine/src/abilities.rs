use std::str::FromStr;

use crate::constants::{FIREBALL_MISS_CHANCE, POISON_POWER, RAGE_SELF_DAMAGE};
use crate::error::DuelError;
use crate::types::{Ability, AbilityId, AbilityKind};

pub const ABILITIES: [Ability; 11] = [
    // Strike: plain 5 damage
    Ability {
        id: AbilityId::Strike,
        name: "Strike",
        kind: AbilityKind::Damage,
        power: 5,
    },
    // Heal: restore 4 HP
    Ability {
        id: AbilityId::Heal,
        name: "Heal",
        kind: AbilityKind::Heal,
        power: 4,
    },
    // Block: reduce incoming damage by 4 this turn
    Ability {
        id: AbilityId::Block,
        name: "Block",
        kind: AbilityKind::Block,
        power: 4,
    },
    // Stun: 2 damage, cancels the opponent's action this turn
    Ability {
        id: AbilityId::Stun,
        name: "Stun",
        kind: AbilityKind::Stun,
        power: 2,
    },
    // Drain: 3 damage, heal for whatever got through
    Ability {
        id: AbilityId::Drain,
        name: "Drain",
        kind: AbilityKind::Drain,
        power: 3,
    },
    // Fireball: 7 damage, 50% miss unless the target is stunned
    Ability {
        id: AbilityId::Fireball,
        name: "Fireball",
        kind: AbilityKind::Damage,
        power: 7,
    },
    // Dodge: avoid all damage this turn
    Ability {
        id: AbilityId::Dodge,
        name: "Dodge",
        kind: AbilityKind::Dodge,
        power: 0,
    },
    // Poison Strike: 2 damage, then 2/turn from the next turn on
    Ability {
        id: AbilityId::Poison,
        name: "Poison Strike",
        kind: AbilityKind::Poison,
        power: 2,
    },
    // Berserker Rage: 6 damage, RAGE_SELF_DAMAGE recoil
    Ability {
        id: AbilityId::Rage,
        name: "Berserker Rage",
        kind: AbilityKind::Damage,
        power: 6,
    },
    // Vampiric Strike: 4 damage, heal for whatever got through
    Ability {
        id: AbilityId::Lifesteal,
        name: "Vampiric Strike",
        kind: AbilityKind::Drain,
        power: 4,
    },
    // Ice Shard: 3 damage, blocks the target's healing next turn
    Ability {
        id: AbilityId::Freeze,
        name: "Ice Shard",
        kind: AbilityKind::Freeze,
        power: 3,
    },
];

/// Catalog entry for `id`. Every id has exactly one entry.
pub fn get_ability(id: AbilityId) -> &'static Ability {
    match ABILITIES.iter().find(|a| a.id == id) {
        Some(ability) => ability,
        None => unreachable!("catalog is missing {id}"),
    }
}

/// Looks up a catalog ability from its string id.
pub fn ability_by_name(raw: &str) -> Result<&'static Ability, DuelError> {
    let id = AbilityId::from_str(raw).map_err(|_| DuelError::UnknownAbility(raw.to_string()))?;
    Ok(get_ability(id))
}

/// Player-facing description of an ability, phrased from the rule constants.
pub fn describe(ability: &Ability) -> String {
    let p = ability.power;
    match (ability.id, ability.kind) {
        (AbilityId::Fireball, _) => {
            let miss = (FIREBALL_MISS_CHANCE * 100.0).round() as u32;
            format!("Deal {p} damage but {miss}% chance to miss.")
        }
        (AbilityId::Rage, _) => {
            format!("Deal {p} damage but take {RAGE_SELF_DAMAGE} self-damage.")
        }
        (_, AbilityKind::Damage) => format!("Deal {p} damage to opponent."),
        (_, AbilityKind::Heal) => format!("Restore {p} HP."),
        (_, AbilityKind::Block) => format!("Reduce incoming damage by {p} this turn."),
        (_, AbilityKind::Stun) => {
            format!("Deal {p} damage and cancel the opponent's action this turn.")
        }
        (_, AbilityKind::Drain) => format!("Deal {p} damage and heal for the damage dealt."),
        (_, AbilityKind::Dodge) => "Avoid all damage this turn.".to_string(),
        (_, AbilityKind::Poison) => format!(
            "Deal {p} damage and poison for {POISON_POWER} damage/turn, starting next turn. Refreshes instead of stacking."
        ),
        (_, AbilityKind::Freeze) => {
            format!("Deal {p} damage and block the enemy's healing next turn.")
        }
    }
}
