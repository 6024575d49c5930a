use duel_engine::{Ability, AbilityId, GameRng, ABILITIES};
use rand::seq::SliceRandom;

/// Draws up to `count` distinct catalog abilities, skipping `exclude`.
///
/// Order is shuffled, so the first entry is as random as the rest.
pub fn offer_abilities(rng: &mut GameRng, count: usize, exclude: &[AbilityId]) -> Vec<Ability> {
    let mut pool: Vec<Ability> = ABILITIES
        .iter()
        .filter(|a| !exclude.contains(&a.id))
        .copied()
        .collect();
    pool.shuffle(rng.rng_mut());
    pool.truncate(count);
    pool
}
