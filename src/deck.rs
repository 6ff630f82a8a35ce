//! Dealing: map card identities to owners from one random permutation.

use crate::cards::{Card, DECK_SIZE};
use crate::hand::{Board, HoleCards};
use crate::player::PlayerId;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DealError {
    #[error("{players} players need {needed} cards, the deck has {available}")]
    NotEnoughCards { players: usize, needed: usize, available: usize },
    #[error("shuffle source returned an invalid permutation of {0} indices")]
    BadPermutation(usize),
}

/// The unshuffled card order a permutation is applied to.
///
/// ```
/// use poker_sim::deck::DeckLayout;
///
/// let layout = DeckLayout::standard();
/// assert_eq!(layout.len(), 52);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLayout {
    cards: Vec<Card>,
}

impl DeckLayout {
    pub fn standard() -> Self {
        let cards = (0..DECK_SIZE).filter_map(Card::from_index).collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// Who a dealt card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Owner {
    Player(PlayerId),
    Flop,
    Turn,
    River,
}

/// Supplies shuffles as permutations of `0..n`.
pub trait ShuffleSource {
    fn permutation(&mut self, n: usize) -> Vec<usize>;
}

/// ChaCha8-backed shuffles; reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: ChaCha8Rng,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::rng().next_u64())
    }
}

impl ShuffleSource for SeededShuffle {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..n).collect();
        idx.shuffle(&mut self.rng);
        idx
    }
}

/// One hand's card assignment: `2 × players + 5` cards have an owner, the rest are unused.
#[derive(Debug, Clone, Default)]
pub struct Deal {
    owners: BTreeMap<Card, Owner>,
    // community cards in deal order: flop ×3, turn, river
    community: Vec<Card>,
}

impl Deal {
    /// Deal two cards to each player in seat order, then flop, turn and river.
    pub fn assign(
        layout: &DeckLayout,
        permutation: &[usize],
        players: &[PlayerId],
    ) -> Result<Deal, DealError> {
        let needed = players.len() * 2 + 5;
        if needed > layout.len() {
            return Err(DealError::NotEnoughCards {
                players: players.len(),
                needed,
                available: layout.len(),
            });
        }
        let mut seen = vec![false; layout.len()];
        let fresh = |i: usize| i < seen.len() && !std::mem::replace(&mut seen[i], true);
        let valid = permutation.len() == layout.len() && permutation.iter().copied().all(fresh);
        if !valid {
            return Err(DealError::BadPermutation(permutation.len()));
        }

        let mut deck = permutation.iter().map(|&i| layout.cards[i]);
        let mut deal = Deal::default();
        for &id in players {
            for card in deck.by_ref().take(2) {
                deal.owners.insert(card, Owner::Player(id));
            }
        }
        for owner in [Owner::Flop, Owner::Flop, Owner::Flop, Owner::Turn, Owner::River] {
            if let Some(card) = deck.next() {
                deal.owners.insert(card, owner);
                deal.community.push(card);
            }
        }
        Ok(deal)
    }

    pub fn owner(&self, card: Card) -> Option<Owner> {
        self.owners.get(&card).copied()
    }

    /// Number of cards that received an owner.
    pub fn assigned(&self) -> usize {
        self.owners.len()
    }

    pub fn hole_cards(&self, id: PlayerId) -> Option<HoleCards> {
        let owner = Owner::Player(id);
        let mut mine = self.owners.iter().filter(|(_, &o)| o == owner).map(|(&c, _)| c);
        let (a, b) = (mine.next()?, mine.next()?);
        HoleCards::try_new(a, b).ok()
    }

    /// The first `revealed` community cards: 3 for the flop, 4 with the turn, 5 with the river.
    pub fn board(&self, revealed: usize) -> Board {
        let upto = revealed.min(self.community.len());
        Board::try_new(self.community[..upto].to_vec()).unwrap_or_default()
    }
}

/// Assign a full hand from a fresh permutation of the layout.
pub fn deal_hand(
    layout: &DeckLayout,
    shuffle: &mut dyn ShuffleSource,
    players: &[PlayerId],
) -> Result<Deal, DealError> {
    let permutation = shuffle.permutation(layout.len());
    Deal::assign(layout, &permutation, players)
}
