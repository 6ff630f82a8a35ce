//! Hand strength evaluation.
//!
//! The betting engine only needs a total order over hands, so it talks to an [`Evaluator`].
//! [`HoldemEvaluator`] is the default: best five of seven, brute force over all 21 subsets.

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;

/// Compact, comparable hand strength. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

impl HandValue {
    /// Pack a category and up to five rank tiebreakers, most significant first.
    fn pack(category: Category, ranks: &[Rank]) -> Self {
        // [ category (8) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) ]
        let mut v = u64::from(category.ordinal()) << 30;
        for (i, r) in ranks.iter().take(5).enumerate() {
            v |= u64::from(r.value()) << (24 - 6 * i as u32);
        }
        HandValue(v)
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Evaluation result; `value` alone drives ordering, so equal values are ties.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Evaluation {
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: board has {0}")]
    NotEnoughCards(usize),
}

/// Produces a totally ordered strength for a player's hole cards plus the community cards.
pub trait Evaluator {
    fn evaluate(&self, hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError>;
}

/// Texas Hold'em: best five-card hand out of two hole cards and a full five-card board.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldemEvaluator;

impl Evaluator for HoldemEvaluator {
    fn evaluate(&self, hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
        validate_holdem(hole, board)?;
        let b = board.as_slice();
        if b.len() < 5 {
            return Err(EvalError::NotEnoughCards(b.len()));
        }
        Ok(evaluate_seven(&[hole.first(), hole.second(), b[0], b[1], b[2], b[3], b[4]]))
    }
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.cmp(a));

    // (count, rank) groups, biggest group first, then higher rank
    let mut counts = [0u8; 15];
    for c in &sorted {
        counts[c.rank().value() as usize] += 1;
    }
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .map(|&r| (counts[r.value() as usize], r))
        .filter(|&(n, _)| n > 0)
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let by_group: Vec<Rank> = groups.iter().map(|&(_, r)| r).collect();

    let flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
    let straight_top = straight_top(&groups);

    let second = groups.get(1).map(|g| g.0);
    let (category, tiebreak) = match (straight_top, flush, groups[0].0, second) {
        (Some(top), true, _, _) => (Category::StraightFlush, vec![top]),
        (_, _, 4, _) => (Category::FourOfAKind, by_group),
        (_, _, 3, Some(2)) => (Category::FullHouse, by_group),
        (_, true, _, _) => (Category::Flush, by_group),
        (Some(top), _, _, _) => (Category::Straight, vec![top]),
        (_, _, 3, _) => (Category::ThreeOfAKind, by_group),
        (_, _, 2, Some(2)) => (Category::TwoPair, by_group),
        (_, _, 2, _) => (Category::Pair, by_group),
        _ => (Category::HighCard, by_group),
    };
    Evaluation { category, best_five: sorted, value: HandValue::pack(category, &tiebreak) }
}

fn straight_top(groups: &[(u8, Rank)]) -> Option<Rank> {
    if groups.len() != 5 {
        return None;
    }
    // groups are all singletons here, ordered high to low
    let hi = groups[0].1.value();
    let lo = groups[4].1.value();
    if hi - lo == 4 {
        return Some(groups[0].1);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    if groups.iter().map(|g| g.1).eq(wheel) {
        return Some(Rank::Five);
    }
    None
}

/// Best of the 21 five-card subsets of seven cards.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    let mut best = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    // choose the two cards to leave out
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let mut hand = [cards[0]; 5];
            let mut n = 0;
            for (i, &c) in cards.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    hand[n] = c;
                    n += 1;
                }
            }
            let eval = evaluate_five(&hand);
            if eval > best {
                best = eval;
            }
        }
    }
    best
}
