//! Agents: ready-made [`Controller`]s.
//!
//! [`ScriptedController`] replays fixed decisions and records every callback, which makes it the
//! harness for driving a hand deterministically. [`BotController`] plays whole tables of seeded
//! bots for the simulator binary.

use crate::controller::{Action, Controller, ControllerError};
use crate::engine::GameView;
use crate::game::GamePhase;
use crate::player::{Money, PlayerId};
use std::collections::{HashMap, VecDeque};

mod bots;

pub use bots::{BotController, BotProfile, Difficulty};

/// Replays queued entrants and per-player decisions.
///
/// A player with nothing left in their script calls.
#[derive(Debug, Default)]
pub struct ScriptedController {
    entrants: VecDeque<PlayerId>,
    scripts: HashMap<PlayerId, VecDeque<Result<Action, ControllerError>>>,
    removed: Vec<PlayerId>,
    invalid: Vec<(PlayerId, Money)>,
    phases: Vec<GamePhase>,
    asked: Vec<PlayerId>,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue players to be handed out by `get_new_players`, in order.
    pub fn with_entrants(mut self, ids: impl IntoIterator<Item = PlayerId>) -> Self {
        self.entrants.extend(ids);
        self
    }

    /// Append decisions for `id`.
    pub fn script(mut self, id: PlayerId, actions: impl IntoIterator<Item = Action>) -> Self {
        self.scripts.entry(id).or_default().extend(actions.into_iter().map(Ok));
        self
    }

    /// Make the next decision for `id` fail instead.
    pub fn fail(mut self, id: PlayerId, err: ControllerError) -> Self {
        self.scripts.entry(id).or_default().push_back(Err(err));
        self
    }

    pub fn removed(&self) -> &[PlayerId] {
        &self.removed
    }

    pub fn invalid_bets(&self) -> &[(PlayerId, Money)] {
        &self.invalid
    }

    /// Every phase reported through `inspect`, oldest first.
    pub fn phases(&self) -> &[GamePhase] {
        &self.phases
    }

    /// Players asked for a decision, in the order they were asked.
    pub fn asked(&self) -> &[PlayerId] {
        &self.asked
    }
}

impl Controller for ScriptedController {
    fn get_new_players(&mut self, _game: &dyn GameView, n: usize) -> Vec<PlayerId> {
        let take = n.min(self.entrants.len());
        self.entrants.drain(..take).collect()
    }

    fn remove_player_from_game(&mut self, _game: &dyn GameView, id: PlayerId) {
        self.removed.push(id);
    }

    fn get_player_bet(
        &mut self,
        _game: &dyn GameView,
        id: PlayerId,
    ) -> Result<Action, ControllerError> {
        self.asked.push(id);
        self.scripts.get_mut(&id).and_then(VecDeque::pop_front).unwrap_or(Ok(Action::Call))
    }

    fn register_invalid_bet(&mut self, _game: &dyn GameView, id: PlayerId, amount: Money) {
        self.invalid.push((id, amount));
    }

    fn inspect(&mut self, _game: &dyn GameView, phase: GamePhase) {
        self.phases.push(phase);
    }
}
