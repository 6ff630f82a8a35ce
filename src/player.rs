use crate::evaluator::Evaluation;
use crate::hand::HoleCards;
use std::fmt;

/// Chips. Unsigned, so a negative stack cannot be represented.
pub type Money = u64;

/// Opaque, stable player identity assigned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Per-round status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Still owes an action this round.
    Active,
    Folded,
    /// Has matched the current stake (or is all-in).
    Called,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) status: PlayerStatus,
    pub(crate) wealth: Money,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) best: Option<Evaluation>,
}

impl Player {
    pub fn new(id: PlayerId, wealth: Money) -> Self {
        Self { id, status: PlayerStatus::Active, wealth, hole: None, best: None }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn wealth(&self) -> Money {
        self.wealth
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Best evaluation, filled in at showdown.
    pub fn best(&self) -> Option<Evaluation> {
        self.best
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn is_all_in(&self) -> bool {
        self.wealth == 0 && !self.is_folded()
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }
}
