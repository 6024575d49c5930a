// Property-based tests over random ability sequences with decay between turns
use duel_engine::{
    decay, resolve_turn, AbilityId, Combatant, GameRng, StatusKind, TurnAction, ABILITIES,
};
use proptest::prelude::*;

fn any_ability() -> impl Strategy<Value = AbilityId> {
    prop::sample::select(ABILITIES.iter().map(|a| a.id).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn proptest_hp_stays_in_bounds(
        max_hp in 1u32..40,
        seed in any::<u64>(),
        picks in prop::collection::vec((any_ability(), any_ability()), 1..30)
    ) {
        let mut player = Combatant::new("Riven", max_hp);
        let mut ai = Combatant::new("Orion", max_hp);
        let mut rng = GameRng::from_seed(seed);

        for (turn, (pp, ap)) in picks.iter().enumerate() {
            let result = resolve_turn(
                &player,
                &ai,
                &TurnAction::new(&ABILITIES, *pp),
                &TurnAction::new(&ABILITIES, *ap),
                turn as u32 + 1,
                &mut rng,
            )
            .expect("catalog picks are always offered");

            prop_assert!(result.player.hp <= result.player.max_hp);
            prop_assert!(result.ai.hp <= result.ai.max_hp);
            prop_assert!(result.player.status_effects.count(StatusKind::Poison) <= 1);
            prop_assert!(result.ai.status_effects.count(StatusKind::Poison) <= 1);

            let outcome = result.outcome();
            player = decay(&result.player);
            ai = decay(&result.ai);
            if outcome.is_over() {
                break;
            }
        }
    }

    #[test]
    fn proptest_same_seed_same_turns(
        seed in any::<u64>(),
        picks in prop::collection::vec((any_ability(), any_ability()), 1..10)
    ) {
        let run = |seed: u64| {
            let mut player = Combatant::new("Riven", 20);
            let mut ai = Combatant::new("Orion", 20);
            let mut rng = GameRng::from_seed(seed);
            let mut hps = Vec::new();
            for (turn, (pp, ap)) in picks.iter().enumerate() {
                let result = resolve_turn(
                    &player,
                    &ai,
                    &TurnAction::new(&ABILITIES, *pp),
                    &TurnAction::new(&ABILITIES, *ap),
                    turn as u32,
                    &mut rng,
                )
                .expect("catalog picks are always offered");
                hps.push((result.player.hp, result.ai.hp));
                player = decay(&result.player);
                ai = decay(&result.ai);
            }
            hps
        };
        prop_assert_eq!(run(seed), run(seed));
    }

    #[test]
    fn proptest_decay_only_shrinks(
        picks in prop::collection::vec((any_ability(), any_ability()), 1..10)
    ) {
        let mut player = Combatant::new("Riven", 30);
        let mut ai = Combatant::new("Orion", 30);
        let mut rng = GameRng::from_seed(3);
        for (turn, (pp, ap)) in picks.iter().enumerate() {
            let result = resolve_turn(
                &player,
                &ai,
                &TurnAction::new(&ABILITIES, *pp),
                &TurnAction::new(&ABILITIES, *ap),
                turn as u32,
                &mut rng,
            )
            .expect("catalog picks are always offered");
            let next = decay(&result.ai);
            prop_assert!(next.status_effects.len() <= result.ai.status_effects.len());
            prop_assert!(next.status_effects.iter().all(|e| e.remaining_turns() > 0));
            player = decay(&result.player);
            ai = next;
        }
    }
}
