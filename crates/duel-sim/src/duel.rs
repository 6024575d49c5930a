//! One duel from the welcome line to the game-over line.

use duel_engine::constants::OPTIONS_PER_TURN;
use duel_engine::log::TurnLog;
use duel_engine::{
    decay_with_expired, resolve_turn, Ability, AbilityId, Combatant, GameRng, LogEntry, Outcome,
    Side, StatusEffect, TurnAction, TurnEvent, TurnResult,
};

use crate::chooser::{resolve_choice, DuelView, MoveChoice, MoveChooser};
use crate::draft::offer_abilities;
use crate::error::SimError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuelStatus {
    Finished(Outcome),
    /// Both sides were still standing after the turn limit.
    Timeout,
}

/// Everything that happened in one call to [`Duel::play_turn`].
#[derive(Clone, Debug)]
pub struct TurnRecord {
    pub player_choice: MoveChoice,
    pub ai_choice: MoveChoice,
    pub result: TurnResult,
    /// Effects that ran out in the decay after this turn.
    pub player_expired: Vec<StatusEffect>,
    pub ai_expired: Vec<StatusEffect>,
}

pub struct Duel {
    player: Combatant,
    ai: Combatant,
    /// Turns resolved so far.
    turn: u32,
    log: Vec<LogEntry>,
    player_offer: Vec<Ability>,
    ai_offer: Vec<Ability>,
    banned: Vec<AbilityId>,
    outcome: Outcome,
    rng: GameRng,
}

impl Duel {
    pub fn new(player: Combatant, ai: Combatant, rng: GameRng) -> Self {
        Self::with_banned(player, ai, rng, Vec::new())
    }

    /// A duel in which `banned` abilities are never offered.
    pub fn with_banned(player: Combatant, ai: Combatant, mut rng: GameRng, banned: Vec<AbilityId>) -> Self {
        let mut opening = TurnLog::new(0, &player.name, &ai.name);
        opening.push(TurnEvent::DuelStarted);
        let log = opening.into_entries();

        let player_offer = offer_abilities(&mut rng, OPTIONS_PER_TURN, &banned);
        let ai_offer = offer_abilities(&mut rng, OPTIONS_PER_TURN, &banned);

        Self {
            player,
            ai,
            turn: 0,
            log,
            player_offer,
            ai_offer,
            banned,
            outcome: Outcome::Ongoing,
            rng,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn ai(&self) -> &Combatant {
        &self.ai
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn into_log(self) -> Vec<LogEntry> {
        self.log
    }

    pub fn offer(&self, side: Side) -> &[Ability] {
        match side {
            Side::Player => &self.player_offer,
            Side::Ai => &self.ai_offer,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed
    }

    /// Plays one turn: both choosers pick from their offers, the engine
    /// resolves, effects decay and fresh offers are drawn.
    pub fn play_turn(
        &mut self,
        player_chooser: &mut dyn MoveChooser,
        ai_chooser: &mut dyn MoveChooser,
    ) -> Result<TurnRecord, SimError> {
        if self.outcome.is_over() {
            return Err(SimError::DuelOver);
        }
        let turn = self.turn + 1;

        let player_choice = player_chooser.choose(
            &DuelView {
                turn,
                me: &self.player,
                foe: &self.ai,
                offered: &self.player_offer,
                foe_offered: &self.ai_offer,
                log: &self.log,
            },
            &mut self.rng,
        );
        let ai_choice = ai_chooser.choose(
            &DuelView {
                turn,
                me: &self.ai,
                foe: &self.player,
                offered: &self.ai_offer,
                foe_offered: &self.player_offer,
                log: &self.log,
            },
            &mut self.rng,
        );

        let player_ability = resolve_choice(&player_choice, &self.player_offer)
            .ok_or(SimError::EmptyOffer { side: Side::Player })?;
        let ai_ability = resolve_choice(&ai_choice, &self.ai_offer)
            .ok_or(SimError::EmptyOffer { side: Side::Ai })?;

        tracing::debug!(
            turn,
            player = %player_ability.id,
            player_chooser = player_chooser.name(),
            ai = %ai_ability.id,
            ai_chooser = ai_chooser.name(),
            "choices locked in"
        );

        let result = resolve_turn(
            &self.player,
            &self.ai,
            &TurnAction::new(&self.player_offer, player_ability.id),
            &TurnAction::new(&self.ai_offer, ai_ability.id),
            turn,
            &mut self.rng,
        )
        .inspect_err(|err| {
            tracing::error!(turn, severity = ?err.severity(), %err, "engine rejected the turn");
        })?;

        self.turn = turn;
        let (player, player_expired) = decay_with_expired(&result.player);
        let (ai, ai_expired) = decay_with_expired(&result.ai);
        self.player = player;
        self.ai = ai;
        self.log.extend(result.log.iter().cloned());
        self.outcome = result.outcome();

        let expired: Vec<TurnEvent> = player_expired
            .iter()
            .map(|e| (Side::Player, e))
            .chain(ai_expired.iter().map(|e| (Side::Ai, e)))
            .map(|(side, e)| TurnEvent::EffectExpired {
                side,
                kind: e.kind(),
            })
            .collect();
        self.push_closing(expired);

        if self.outcome.is_over() {
            self.push_closing([TurnEvent::DuelOver {
                winner: self.outcome.winner(),
            }]);
            tracing::info!(turn, outcome = %self.outcome, "duel over");
        } else {
            self.player_offer = offer_abilities(&mut self.rng, OPTIONS_PER_TURN, &self.banned);
            self.ai_offer = offer_abilities(&mut self.rng, OPTIONS_PER_TURN, &self.banned);
        }

        Ok(TurnRecord {
            player_choice,
            ai_choice,
            result,
            player_expired,
            ai_expired,
        })
    }

    /// Plays until someone wins or `max_turns` turns have been resolved.
    pub fn run(
        &mut self,
        player_chooser: &mut dyn MoveChooser,
        ai_chooser: &mut dyn MoveChooser,
        max_turns: u32,
    ) -> Result<DuelStatus, SimError> {
        while !self.outcome.is_over() && self.turn < max_turns {
            self.play_turn(player_chooser, ai_chooser)?;
        }

        if self.outcome.is_over() {
            Ok(DuelStatus::Finished(self.outcome))
        } else {
            self.push_closing([TurnEvent::DuelTimedOut { turns: self.turn }]);
            tracing::info!(turns = self.turn, "duel timed out");
            Ok(DuelStatus::Timeout)
        }
    }

    /// Appends system events to the current turn's entries.
    fn push_closing(&mut self, events: impl IntoIterator<Item = TurnEvent>) {
        let next_seq = self
            .log
            .iter()
            .filter(|e| e.turn == self.turn)
            .count() as u32;
        let mut closing = TurnLog::resume(self.turn, &self.player.name, &self.ai.name, next_seq);
        for event in events {
            closing.push(event);
        }
        self.log.extend(closing.into_entries());
    }
}
