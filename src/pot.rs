//! Commitments per betting round and the side pots derived from them.
//!
//! The pot never stores side pots. They are derived on demand from cumulative commitments:
//! one tier per distinct commitment level, so an all-in for less than the others splits the
//! money into exactly the slices that player can and cannot win.

use crate::player::{Money, Player, PlayerId};
use std::collections::{BTreeMap, BTreeSet};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PotError {
    #[error("player {player} cannot commit {amount} with only {wealth} behind")]
    InsufficientWealth { player: PlayerId, amount: Money, wealth: Money },
}

/// One tier of the pot: everything committed between the previous level and `threshold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePot {
    /// Cumulative commitment a player needs to have a claim on this tier.
    pub threshold: Money,
    pub amount: Money,
    pub stakeholders: BTreeSet<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct Pot {
    closed: Vec<BTreeMap<PlayerId, Money>>,
    current: BTreeMap<PlayerId, Money>,
}

impl Default for Pot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pot {
    /// A pot with the first (pre-flop) round already open.
    pub fn new() -> Self {
        Self { closed: Vec::new(), current: BTreeMap::new() }
    }

    /// Open the next street. The amount to call starts again from zero.
    pub fn new_round(&mut self) {
        self.closed.push(std::mem::take(&mut self.current));
    }

    fn rounds(&self) -> impl Iterator<Item = &BTreeMap<PlayerId, Money>> {
        self.closed.iter().chain(std::iter::once(&self.current))
    }

    /// Move `amount` from the player's wealth into the current round.
    pub fn commit_bet(&mut self, player: &mut Player, amount: Money) -> Result<(), PotError> {
        let rest = player.wealth.checked_sub(amount).ok_or(PotError::InsufficientWealth {
            player: player.id,
            amount,
            wealth: player.wealth,
        })?;
        player.wealth = rest;
        *self.current.entry(player.id).or_default() += amount;
        Ok(())
    }

    /// Highest amount anyone has committed this round.
    pub fn current_bet(&self) -> Money {
        self.current.values().max().copied().unwrap_or(0)
    }

    pub fn committed_this_round(&self, id: PlayerId) -> Money {
        self.current.get(&id).copied().unwrap_or(0)
    }

    /// Chips the player must add to match the current bet.
    pub fn to_call(&self, id: PlayerId) -> Money {
        self.current_bet().saturating_sub(self.committed_this_round(id))
    }

    /// How far committing `amount` more would take the player past the current bet.
    /// Positive means the bet is a raise.
    pub fn raise_amount(&self, id: PlayerId, amount: Money) -> Money {
        (self.committed_this_round(id) + amount).saturating_sub(self.current_bet())
    }

    /// An under-call is only legal as an all-in; betting more than one's stack never is.
    pub fn bet_invalid(&self, player: &Player, amount: Money) -> bool {
        if amount > player.wealth {
            return true;
        }
        let all_in = amount == player.wealth;
        amount < self.to_call(player.id) && !all_in
    }

    /// Total committed by the player across every round of the hand.
    pub fn committed(&self, id: PlayerId) -> Money {
        self.rounds().filter_map(|r| r.get(&id)).sum()
    }

    pub fn total(&self) -> Money {
        self.rounds().flat_map(|r| r.values()).sum()
    }

    fn cumulative(&self) -> BTreeMap<PlayerId, Money> {
        let mut totals: BTreeMap<PlayerId, Money> = BTreeMap::new();
        for (id, amount) in self.rounds().flatten() {
            *totals.entry(*id).or_default() += amount;
        }
        totals
    }

    /// Side pots ordered from the lowest threshold (main pot) upward.
    pub fn side_pots(&self) -> Vec<SidePot> {
        let totals = self.cumulative();
        let levels: BTreeSet<Money> = totals.values().copied().filter(|&m| m > 0).collect();
        let mut prev = 0;
        let mut pots = Vec::with_capacity(levels.len());
        for threshold in levels {
            let stakeholders: BTreeSet<PlayerId> =
                totals.iter().filter(|(_, &m)| m >= threshold).map(|(&id, _)| id).collect();
            let amount = (threshold - prev) * stakeholders.len() as Money;
            pots.push(SidePot { threshold, amount, stakeholders });
            prev = threshold;
        }
        pots
    }

    /// Tier sizes, lowest threshold first.
    pub fn amounts(&self) -> Vec<Money> {
        self.side_pots().into_iter().map(|p| p.amount).collect()
    }

    /// Tier stakeholder sets, aligned with [`Pot::amounts`].
    pub fn stakeholders(&self) -> Vec<BTreeSet<PlayerId>> {
        self.side_pots().into_iter().map(|p| p.stakeholders).collect()
    }
}
