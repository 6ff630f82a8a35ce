//! The collaborator that sources players and their decisions.
//!
//! The game never reads input or talks to a network itself. Everything it needs from the
//! outside world goes through a [`Controller`], which only ever sees the game through the
//! read-only [`GameView`].

use crate::engine::GameView;
use crate::game::GamePhase;
use crate::player::{Money, PlayerId};

/// A player's decision when it is their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    /// Match the amount to call, or go all-in if that is not affordable. Checks when
    /// nothing is owed.
    Call,
    /// Put `n` more chips in this round. Validated against the call amount and stack.
    Bet(Money),
}

/// Failure to obtain a decision. The game folds the player and removes them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("player {0} timed out")]
    Timeout(PlayerId),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed action: {0}")]
    Malformed(String),
}

pub trait Controller {
    /// Up to `n` new entrants to seat. Returning fewer, or none, is fine.
    fn get_new_players(&mut self, game: &dyn GameView, n: usize) -> Vec<PlayerId>;

    /// The player is leaving: busted, errored out, or evicted.
    fn remove_player_from_game(&mut self, game: &dyn GameView, id: PlayerId);

    fn get_player_bet(
        &mut self,
        game: &dyn GameView,
        id: PlayerId,
    ) -> Result<Action, ControllerError>;

    /// The player bet an illegal amount and was folded for it.
    fn register_invalid_bet(&mut self, game: &dyn GameView, id: PlayerId, amount: Money);

    /// Called after every phase transition; a place to pause or print. Default: nothing.
    fn inspect(&mut self, _game: &dyn GameView, _phase: GamePhase) {}
}
