// Multi-turn duels driven through the public API only
use duel_engine::{
    decay, get_ability, log, resolve_turn, Ability, AbilityId, Combatant, LogKind, Outcome,
    ScriptedRolls, Side, TurnAction, TurnEvent, TurnResult,
};

fn offer(ids: &[AbilityId]) -> Vec<Ability> {
    ids.iter().map(|id| *get_ability(*id)).collect()
}

fn turn(
    player: &Combatant,
    ai: &Combatant,
    player_pick: AbilityId,
    ai_pick: AbilityId,
    n: u32,
) -> TurnResult {
    let player_offer = offer(&[player_pick, AbilityId::Strike, AbilityId::Heal]);
    let ai_offer = offer(&[ai_pick, AbilityId::Block, AbilityId::Dodge]);
    resolve_turn(
        player,
        ai,
        &TurnAction::new(&player_offer, player_pick),
        &TurnAction::new(&ai_offer, ai_pick),
        n,
        &mut ScriptedRolls::default(),
    )
    .unwrap()
}

#[test]
fn drain_against_block_and_heal() {
    let player = Combatant::new("Riven", 20).with_hp(15);
    let ai = Combatant::new("Orion", 20).with_hp(10);

    let result = turn(&player, &ai, AbilityId::Drain, AbilityId::Block, 1);
    // Block soaks all 3; nothing to drain.
    assert_eq!(result.ai.hp, 10);
    assert_eq!(result.player.hp, 15);

    let result = turn(&player, &ai, AbilityId::Drain, AbilityId::Heal, 1);
    assert_eq!(result.ai.hp, 11);
    assert_eq!(result.player.hp, 18);
}

#[test]
fn drain_scenario_from_full_health() {
    let player = Combatant::new("Riven", 20);
    let ai = Combatant::new("Orion", 20);
    let offered = offer(&[AbilityId::Drain, AbilityId::Stun, AbilityId::Heal]);
    let ai_offered = offer(&[AbilityId::Fireball, AbilityId::Dodge, AbilityId::Strike]);

    // Fireball always misses here, so only the drain lands.
    let result = resolve_turn(
        &player,
        &ai,
        &TurnAction::new(&offered, AbilityId::Drain),
        &TurnAction::new(&ai_offered, AbilityId::Fireball),
        1,
        &mut ScriptedRolls::new([true]),
    )
    .unwrap();

    assert_eq!(result.ai.hp, 17);
    assert_eq!(result.player.hp, 20);
    assert_eq!(result.player_report.healed, 3);
    assert!(result.ai_report.missed);
}

#[test]
fn poison_direct_hit_then_tick() {
    let player = Combatant::new("Riven", 20);
    let ai = Combatant::new("Orion", 20);

    let first = turn(&player, &ai, AbilityId::Poison, AbilityId::Strike, 1);
    assert_eq!(first.ai.hp, 18, "direct hit only");
    assert_eq!(first.ai_report.damage_taken, 2);
    assert_eq!(first.ai_report.poison_damage, 0);

    let (player, ai) = (decay(&first.player), decay(&first.ai));
    let second = turn(&player, &ai, AbilityId::Block, AbilityId::Strike, 2);
    assert_eq!(second.ai.hp, 16, "tick only");
    assert_eq!(second.ai_report.damage_taken, 0);
    assert_eq!(second.ai_report.poison_damage, 2);
}

#[test]
fn poison_through_dodge_over_three_turns() {
    let player = Combatant::new("Riven", 20);
    let ai = Combatant::new("Orion", 20);

    let first = turn(&player, &ai, AbilityId::Poison, AbilityId::Dodge, 1);
    assert_eq!(first.ai.hp, 20, "dodged the direct hit");
    assert!(first.ai.status_effects.poison().is_some());

    let (player, ai) = (decay(&first.player), decay(&first.ai));
    let second = turn(&player, &ai, AbilityId::Heal, AbilityId::Dodge, 2);
    assert_eq!(second.ai.hp, 18);
    assert_eq!(second.ai_report.poison_damage, 2);

    let (player, ai) = (decay(&second.player), decay(&second.ai));
    let third = turn(&player, &ai, AbilityId::Heal, AbilityId::Dodge, 3);
    assert_eq!(third.ai.hp, 16);

    let ai = decay(&third.ai);
    assert!(ai.status_effects.poison().is_none());
}

#[test]
fn accumulated_log_keeps_unique_ids() {
    let mut player = Combatant::new("Riven", 20);
    let mut ai = Combatant::new("Orion", 20);
    let mut entries = Vec::new();

    for n in 1..=4 {
        let result = turn(&player, &ai, AbilityId::Strike, AbilityId::Block, n);
        entries.extend(result.log.iter().cloned());
        player = decay(&result.player);
        ai = decay(&result.ai);
    }

    let mut ids: Vec<String> = entries.iter().map(|e| e.id()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(log::entries_for_turn(&entries, 3).len(), total / 4);
    assert_eq!(log::filter_by_kind(&entries, LogKind::Action).len(), 8);
}

#[test]
fn stun_lock_until_knockout() {
    let mut player = Combatant::new("Riven", 20);
    let mut ai = Combatant::new("Orion", 20).with_hp(5);
    let mut n = 0;

    let outcome = loop {
        n += 1;
        let result = turn(&player, &ai, AbilityId::Stun, AbilityId::Fireball, n);
        assert!(result.ai_report.cancelled);
        assert!(result
            .log
            .iter()
            .any(|e| e.event == TurnEvent::ActionCancelled { side: Side::Ai, ability: AbilityId::Fireball }));
        let outcome = result.outcome();
        player = decay(&result.player);
        ai = decay(&result.ai);
        if outcome.is_over() {
            break outcome;
        }
    };

    assert_eq!(outcome, Outcome::PlayerWins);
    assert_eq!(n, 3);
    assert_eq!(player.hp, 20);
}
