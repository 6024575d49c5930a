use crate::constants::{
    BLOCK_DURATION, DODGE_DURATION, FIREBALL_MISS_CHANCE, FREEZE_DURATION, POISON_DURATION,
    POISON_POWER, RAGE_SELF_DAMAGE, STUN_DURATION,
};
use crate::damage::{apply_mitigation, clamp_hp};
use crate::error::DuelError;
use crate::log::{TurnEvent, TurnLog};
use crate::roll::RollSource;
use crate::status::{PoisonApplication, StatusEffect, StatusKind};
use crate::types::{
    Ability, AbilityId, AbilityKind, Combatant, Side, SideReport, TurnAction, TurnResult,
};

/// Working copy of one side while a turn resolves.
struct Fighter {
    state: Combatant,
    ability: Ability,
    cancelled: bool,
    /// Raw damage headed at the opponent, before mitigation.
    outgoing: Option<u32>,
    heal: u32,
    self_damage: u32,
    report: SideReport,
}

impl Fighter {
    fn new(state: &Combatant, ability: Ability) -> Self {
        Self {
            state: state.clone(),
            ability,
            cancelled: false,
            outgoing: None,
            heal: 0,
            self_damage: 0,
            report: SideReport {
                action: Some(ability.id),
                ..SideReport::default()
            },
        }
    }

    fn gain(&mut self, effect: StatusEffect) {
        self.report.gained.push(effect.kind());
        self.state.status_effects.push(effect);
    }
}

fn actor_and_target(fighters: &mut [Fighter; 2], side: Side) -> (&mut Fighter, &mut Fighter) {
    let [player, ai] = fighters;
    match side {
        Side::Player => (player, ai),
        Side::Ai => (ai, player),
    }
}

const SIDES: [Side; 2] = [Side::Player, Side::Ai];

/// Resolve one simultaneous turn.
///
/// Inputs are borrowed and never modified; the returned result holds fresh
/// combatants. The caller must still run `status::decay` on both before the
/// next turn. Fails without side effects if a selection was not offered or a
/// combatant is outside its HP range.
pub fn resolve_turn(
    player: &Combatant,
    ai: &Combatant,
    player_action: &TurnAction<'_>,
    ai_action: &TurnAction<'_>,
    turn: u32,
    rolls: &mut impl RollSource,
) -> Result<TurnResult, DuelError> {
    check_combatant(Side::Player, player)?;
    check_combatant(Side::Ai, ai)?;
    let player_ability = select(Side::Player, player_action)?;
    let ai_ability = select(Side::Ai, ai_action)?;

    tracing::debug!(
        turn,
        player = %player_ability.id,
        ai = %ai_ability.id,
        "resolving turn"
    );

    let mut log = TurnLog::new(turn, &player.name, &ai.name);
    let mut fighters = [
        Fighter::new(player, player_ability),
        Fighter::new(ai, ai_ability),
    ];

    // Stun cancellation decides which actions execute at all.
    let player_stuns = player_ability.kind == AbilityKind::Stun;
    let ai_stuns = ai_ability.kind == AbilityKind::Stun;

    if player_stuns && ai_stuns {
        log.push(TurnEvent::MutualStun);
        for fighter in fighters.iter_mut() {
            fighter.cancelled = true;
            fighter.report.cancelled = true;
        }
    } else {
        fighters[0].cancelled = ai_stuns;
        fighters[1].cancelled = player_stuns;

        for side in SIDES {
            let (actor, target) = actor_and_target(&mut fighters, side);
            if actor.cancelled {
                actor.report.cancelled = true;
                actor.gain(StatusEffect::Stun {
                    remaining_turns: STUN_DURATION,
                });
                log.push(TurnEvent::ActionCancelled {
                    side,
                    ability: actor.ability.id,
                });
            } else {
                log.push(TurnEvent::ActionUsed {
                    side,
                    ability: actor.ability.id,
                });
                declare(actor, target, side, &mut log);
            }
        }
    }

    // Every outgoing hit is measured against the target's effects as they
    // stand now, including blocks and dodges raised this turn.
    for side in SIDES {
        let (actor, target) = actor_and_target(&mut fighters, side);
        strike(actor, target, side, &mut log, rolls);
    }

    let mut hp = [0i64; 2];
    for (i, side) in SIDES.into_iter().enumerate() {
        hp[i] = settle(&mut fighters[i], side, &mut log);
    }

    for (i, side) in SIDES.into_iter().enumerate() {
        let fighter = &mut fighters[i];
        let ticks: Vec<u32> = fighter.state.status_effects.ticking_poison().collect();
        for amount in ticks {
            hp[i] -= amount as i64;
            fighter.report.poison_damage = fighter.report.poison_damage.saturating_add(amount);
            log.push(TurnEvent::PoisonTick { side, amount });
        }
        if fighter.state.status_effects.is_thawing() {
            log.push(TurnEvent::Thawing { side });
        }
    }

    for (i, side) in SIDES.into_iter().enumerate() {
        let state = &mut fighters[i].state;
        state.hp = clamp_hp(hp[i], state.max_hp);
        log.push(TurnEvent::FinalHp {
            side,
            hp: state.hp,
            max_hp: state.max_hp,
        });
    }

    let [player_out, ai_out] = fighters;
    tracing::debug!(
        turn,
        player_hp = player_out.state.hp,
        ai_hp = ai_out.state.hp,
        "turn resolved"
    );

    Ok(TurnResult {
        turn,
        player: player_out.state,
        ai: ai_out.state,
        log: log.into_entries(),
        player_report: player_out.report,
        ai_report: ai_out.report,
        player_hp_before_clamp: hp[0],
        ai_hp_before_clamp: hp[1],
    })
}

fn check_combatant(side: Side, combatant: &Combatant) -> Result<(), DuelError> {
    if combatant.max_hp == 0 || combatant.hp > combatant.max_hp {
        return Err(DuelError::InvariantViolation {
            side,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
        });
    }
    Ok(())
}

fn select(side: Side, action: &TurnAction<'_>) -> Result<Ability, DuelError> {
    action
        .offered
        .iter()
        .find(|a| a.id == action.choice)
        .copied()
        .ok_or(DuelError::InvalidSelection {
            side,
            ability: action.choice,
        })
}

/// Queue the actor's damage and heal, and place the statuses its ability
/// creates. Self-applied defences are live immediately.
fn declare(actor: &mut Fighter, target: &mut Fighter, side: Side, log: &mut TurnLog<'_>) {
    let ability = actor.ability;
    match ability.kind {
        AbilityKind::Damage | AbilityKind::Stun | AbilityKind::Drain => {
            actor.outgoing = Some(ability.power);
        }
        AbilityKind::Heal => {
            actor.heal = ability.power;
        }
        AbilityKind::Block => {
            actor.gain(StatusEffect::Block {
                power: ability.power,
                remaining_turns: BLOCK_DURATION,
            });
            log.push(TurnEvent::BlockRaised {
                side,
                power: ability.power,
            });
        }
        AbilityKind::Dodge => {
            actor.gain(StatusEffect::Dodge {
                remaining_turns: DODGE_DURATION,
            });
            log.push(TurnEvent::DodgeReady { side });
        }
        AbilityKind::Poison => {
            actor.outgoing = Some(ability.power);
            let target_side = side.opponent();
            match target.state.status_effects.refresh_or_add_poison(POISON_POWER) {
                PoisonApplication::Created => {
                    target.report.gained.push(StatusKind::Poison);
                    log.push(TurnEvent::PoisonApplied {
                        target: target_side,
                        power: POISON_POWER,
                        turns: POISON_DURATION,
                    });
                }
                PoisonApplication::Refreshed => {
                    log.push(TurnEvent::PoisonRefreshed {
                        target: target_side,
                        turns: POISON_DURATION,
                    });
                }
            }
        }
        AbilityKind::Freeze => {
            actor.outgoing = Some(ability.power);
            target.gain(StatusEffect::Freeze {
                remaining_turns: FREEZE_DURATION,
            });
            log.push(TurnEvent::FreezeApplied {
                target: side.opponent(),
            });
        }
    }

    if ability.id == AbilityId::Rage {
        actor.self_damage += RAGE_SELF_DAMAGE;
    }
}

/// Mitigate the actor's queued damage against the target and apply the named
/// accuracy rule. Records the final amount; HP is not touched here.
fn strike(
    actor: &mut Fighter,
    target: &mut Fighter,
    side: Side,
    log: &mut TurnLog<'_>,
    rolls: &mut impl RollSource,
) {
    let Some(raw) = actor.outgoing else {
        return;
    };
    let source = actor.ability.id;
    let target_side = side.opponent();
    let mitigation = apply_mitigation(raw, &target.state.status_effects);
    let mut dealt = mitigation.amount;

    // A stunned target cannot evade a fireball, so no roll is taken.
    if source == AbilityId::Fireball
        && !target.state.status_effects.is_stunned()
        && rolls.roll(FIREBALL_MISS_CHANCE)
    {
        dealt = 0;
        actor.report.missed = true;
        log.push(TurnEvent::FireballMissed { side });
    } else if mitigation.negated() {
        log.push(TurnEvent::DamageNegated {
            target: target_side,
            source,
            dodged: mitigation.dodged,
            absorbed: mitigation.absorbed,
        });
    } else {
        log.push(TurnEvent::Damage {
            target: target_side,
            amount: dealt,
            source,
        });
    }

    target.report.damage_taken = target.report.damage_taken.saturating_add(dealt);

    if actor.ability.kind == AbilityKind::Drain {
        if dealt > 0 {
            actor.heal = actor.heal.saturating_add(dealt);
        } else {
            log.push(TurnEvent::DrainFizzled { side });
        }
    }
}

/// Net HP for one side after its own heal and recoil and the damage it took.
/// Unclamped.
fn settle(fighter: &mut Fighter, side: Side, log: &mut TurnLog<'_>) -> i64 {
    let mut hp = fighter.state.hp as i64;

    if fighter.heal > 0 {
        if fighter.state.status_effects.is_frozen() {
            fighter.report.heal_blocked = true;
            log.push(TurnEvent::HealBlocked { side });
        } else {
            hp += fighter.heal as i64;
            fighter.report.healed = fighter.heal;
            log.push(TurnEvent::Heal {
                side,
                amount: fighter.heal,
                source: fighter.ability.id,
            });
        }
    }

    if fighter.self_damage > 0 {
        hp -= fighter.self_damage as i64;
        fighter.report.self_damage = fighter.self_damage;
        log.push(TurnEvent::SelfDamage {
            side,
            amount: fighter.self_damage,
            source: fighter.ability.id,
        });
    }

    hp - fighter.report.damage_taken as i64
}
