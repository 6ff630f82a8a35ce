#![allow(dead_code)]

use poker_sim::cards::{parse_cards, DECK_SIZE};
use poker_sim::config::GameConfig;
use poker_sim::deck::ShuffleSource;
use poker_sim::game::Game;
use poker_sim::player::{Money, PlayerId};

/// Deals the same stacked deck every hand.
pub struct Rigged(Vec<usize>);

impl ShuffleSource for Rigged {
    fn permutation(&mut self, _n: usize) -> Vec<usize> {
        self.0.clone()
    }
}

/// Stack the deck so `cards` come off the top in order: two per seat, then the board.
pub fn rigged(cards: &str) -> Rigged {
    let mut order: Vec<usize> =
        parse_cards(cards).expect("valid cards").into_iter().map(|c| c.index()).collect();
    for i in 0..DECK_SIZE {
        if !order.contains(&i) {
            order.push(i);
        }
    }
    Rigged(order)
}

/// A game with players `P0..Pn` seated in order with the given stacks.
pub fn seated(stacks: &[Money], deck: &str) -> Game {
    let cfg = GameConfig::default().with_seed(1).with_capacity(stacks.len().max(2));
    let mut game = Game::new(cfg).expect("valid config").with_shuffle(rigged(deck));
    for (i, &w) in stacks.iter().enumerate() {
        game.seat(PlayerId(i as u32), w).expect("seat");
    }
    game
}

pub fn wealth(game: &Game, id: u32) -> Money {
    game.table().get(PlayerId(id)).map(|p| p.wealth()).unwrap_or(0)
}

/// Chips behind across every seated player. Between hands this is every chip in the game.
pub fn stacks_total(game: &Game) -> Money {
    game.table().players().iter().map(|p| p.wealth()).sum()
}
