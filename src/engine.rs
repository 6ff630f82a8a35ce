// Read-only API boundary handed to controllers. Exposes what a seat (human, bot or remote
// client) may look at without giving it a way to mutate the hand.

use crate::game::{Game, GamePhase, HandHistoryEntry, Street};
use crate::hand::{Board, HoleCards};
use crate::player::{Money, Player, PlayerId};

pub trait GameView {
    // Hand lifecycle
    fn hand_number(&self) -> u64;
    fn phase(&self) -> GamePhase;
    fn street(&self) -> Street;

    // Table
    fn players(&self) -> &[Player];
    fn button(&self) -> usize;
    fn capacity(&self) -> usize;
    fn wealth(&self, id: PlayerId) -> Option<Money>;
    fn hole_cards(&self, id: PlayerId) -> Option<HoleCards>;
    fn board(&self) -> Board;

    // Betting
    fn to_call(&self, id: PlayerId) -> Money;
    fn current_bet(&self) -> Money;
    fn pot_total(&self) -> Money;
    fn big_blind(&self) -> Money;
    fn history(&self) -> &[HandHistoryEntry];
}

impl GameView for Game {
    fn hand_number(&self) -> u64 {
        self.hand_number
    }
    fn phase(&self) -> GamePhase {
        self.phase
    }
    fn street(&self) -> Street {
        self.street
    }

    fn players(&self) -> &[Player] {
        self.table.players()
    }
    fn button(&self) -> usize {
        self.table.button()
    }
    fn capacity(&self) -> usize {
        self.table.capacity()
    }
    fn wealth(&self, id: PlayerId) -> Option<Money> {
        self.table.get(id).map(Player::wealth)
    }
    fn hole_cards(&self, id: PlayerId) -> Option<HoleCards> {
        self.table.get(id).and_then(Player::hole)
    }
    fn board(&self) -> Board {
        self.deal.board(self.revealed)
    }

    fn to_call(&self, id: PlayerId) -> Money {
        self.pot.to_call(id)
    }
    fn current_bet(&self) -> Money {
        self.pot.current_bet()
    }
    fn pot_total(&self) -> Money {
        self.pot.total()
    }
    fn big_blind(&self) -> Money {
        self.config.big_blind
    }
    fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }
}
