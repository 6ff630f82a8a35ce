//! Showdown: winners per side pot and the chip-exact split between them.

use crate::evaluator::{EvalError, Evaluation, Evaluator};
use crate::hand::Board;
use crate::player::{Money, Player, PlayerId};
use crate::pot::Pot;
use crate::table::Table;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShowdownError {
    #[error("contender {0} has no hole cards")]
    MissingHole(PlayerId),
    #[error("hand evaluation failed for {player}: {source}")]
    Evaluation { player: PlayerId, source: EvalError },
}

/// Chips awarded to one player out of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub player: PlayerId,
    pub amount: Money,
    /// Index into [`Pot::side_pots`].
    pub tier: usize,
    /// The tier was shared with at least one other winner.
    pub split: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub payouts: Vec<Payout>,
    /// Chips nobody seated could claim. Zero unless every stakeholder left the table.
    pub unclaimed: Money,
    /// Whether any hands were actually compared.
    pub compared: bool,
}

impl Resolution {
    pub fn total_paid(&self) -> Money {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    /// Sum of payouts per player.
    pub fn by_player(&self) -> BTreeMap<PlayerId, Money> {
        let mut out = BTreeMap::new();
        for p in &self.payouts {
            *out.entry(p.player).or_default() += p.amount;
        }
        out
    }
}

/// Every player whose best hand ties for the maximum. Players without an evaluation
/// (folded, never shown) are ignored.
pub fn find_winners(players: &[&Player]) -> Vec<PlayerId> {
    let Some(top) = players.iter().filter_map(|p| p.best).max() else {
        return Vec::new();
    };
    players.iter().filter(|p| p.best == Some(top)).map(|p| p.id).collect()
}

/// Split `amount` evenly; the remainder goes one chip at a time to `winners` in order.
pub fn split_tier(amount: Money, winners: &[PlayerId]) -> Vec<(PlayerId, Money)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as Money;
    let share = amount / n;
    let odd = (amount % n) as usize;
    winners.iter().enumerate().map(|(i, &id)| (id, share + Money::from(i < odd))).collect()
}

fn contenders<'a>(table: &'a Table, stakeholders: &BTreeSet<PlayerId>) -> Vec<&'a Player> {
    table.get_players(stakeholders).into_iter().filter(|p| !p.is_folded()).collect()
}

/// Distribute the pot to the table.
///
/// Tiers are settled from the top down. A tier with no live stakeholder rolls into the tier
/// below it, whose stakeholders are a superset. Hands are evaluated only for players who
/// contest a tier against someone else.
pub fn resolve(
    table: &mut Table,
    pot: &Pot,
    evaluator: &dyn Evaluator,
    board: &Board,
) -> Result<Resolution, ShowdownError> {
    let tiers = pot.side_pots();

    let mut to_evaluate = BTreeSet::new();
    for tier in &tiers {
        let live = contenders(table, &tier.stakeholders);
        if live.len() > 1 {
            to_evaluate.extend(live.iter().map(|p| p.id));
        }
    }
    for id in &to_evaluate {
        let Some(player) = table.get_mut(*id) else { continue };
        let hole = player.hole.ok_or(ShowdownError::MissingHole(*id))?;
        let best = evaluator
            .evaluate(&hole, board)
            .map_err(|source| ShowdownError::Evaluation { player: *id, source })?;
        debug!("{id} shows {:?}", best.category);
        player.best = Some(best);
    }

    let mut resolution = Resolution { compared: !to_evaluate.is_empty(), ..Resolution::default() };
    let mut carry: Money = 0;
    for (idx, tier) in tiers.iter().enumerate().rev() {
        let amount = tier.amount + carry;
        let live = contenders(table, &tier.stakeholders);
        if live.is_empty() {
            warn!("tier {idx} ({amount}) has no live stakeholder; rolling it down");
            carry = amount;
            continue;
        }
        carry = 0;
        let mut winners = if live.len() == 1 { vec![live[0].id] } else { find_winners(&live) };
        table.order_from_button(&mut winners);
        let split = winners.len() > 1;
        for (player, share) in split_tier(amount, &winners) {
            debug!("tier {idx}: {player} wins {share}");
            resolution.payouts.push(Payout { player, amount: share, tier: idx, split });
        }
    }

    if carry > 0 {
        // every stakeholder folded; give the main pot back to whoever is still seated
        let mut seated: Vec<PlayerId> = tiers
            .first()
            .map(|t| table.get_players(&t.stakeholders).iter().map(|p| p.id).collect())
            .unwrap_or_default();
        table.order_from_button(&mut seated);
        if seated.is_empty() {
            warn!("{carry} chips left unclaimed: no stakeholder is seated");
            resolution.unclaimed = carry;
        }
        let split = seated.len() > 1;
        for (player, share) in split_tier(carry, &seated) {
            resolution.payouts.push(Payout { player, amount: share, tier: 0, split });
        }
    }

    for payout in &resolution.payouts {
        if let Some(p) = table.get_mut(payout.player) {
            p.wealth += payout.amount;
        }
    }
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::HoldemEvaluator;
    use crate::player::PlayerStatus;

    #[test]
    fn split_hands_out_the_odd_chip_in_order() {
        let got = split_tier(101, &[PlayerId(7), PlayerId(3)]);
        assert_eq!(got, vec![(PlayerId(7), 51), (PlayerId(3), 50)]);
        let got = split_tier(10, &[PlayerId(1), PlayerId(2), PlayerId(3)]);
        assert_eq!(got.iter().map(|g| g.1).collect::<Vec<_>>(), vec![4, 3, 3]);
        assert!(split_tier(10, &[]).is_empty());
    }

    fn seat(table: &mut Table, pot: &mut Pot, id: u32, hole: &str, commit: Money) {
        table.add_player_with_wealth(PlayerId(id), 1000).unwrap();
        let p = table.get_mut(PlayerId(id)).unwrap();
        p.hole = Some(hole.parse().unwrap());
        pot.commit_bet(p, commit).unwrap();
    }

    #[test]
    fn lone_survivor_wins_without_evaluation() {
        let mut table = Table::new(10, 1000);
        let mut pot = Pot::new();
        seat(&mut table, &mut pot, 1, "As Ah", 50);
        seat(&mut table, &mut pot, 2, "2c 7d", 100);
        table.get_mut(PlayerId(1)).unwrap().status = PlayerStatus::Folded;

        // an empty board would make any evaluation fail
        let res = resolve(&mut table, &pot, &HoldemEvaluator, &Board::default()).unwrap();
        assert!(!res.compared);
        assert_eq!(res.by_player()[&PlayerId(2)], 150);
        assert_eq!(table.get(PlayerId(2)).unwrap().wealth(), 1000 - 100 + 150);
    }

    #[test]
    fn orphaned_top_tier_rolls_down() {
        let mut table = Table::new(10, 1000);
        let mut pot = Pot::new();
        seat(&mut table, &mut pot, 1, "2c 3d", 40);
        seat(&mut table, &mut pot, 2, "As Ah", 100);
        seat(&mut table, &mut pot, 3, "Ks Kh", 100);
        table.get_mut(PlayerId(2)).unwrap().status = PlayerStatus::Folded;
        table.get_mut(PlayerId(3)).unwrap().status = PlayerStatus::Folded;

        let res = resolve(&mut table, &pot, &HoldemEvaluator, &Board::default()).unwrap();
        assert_eq!(res.total_paid(), 240);
        assert_eq!(res.by_player()[&PlayerId(1)], 240);
        assert_eq!(res.unclaimed, 0);
    }

    #[test]
    fn tied_tier_splits_and_side_tier_goes_to_its_owner() {
        let board: Board = "Ac Kd Qh Js 2c".parse().unwrap();
        let mut table = Table::new(10, 1000);
        let mut pot = Pot::new();
        seat(&mut table, &mut pot, 1, "Tc 3d", 50);
        seat(&mut table, &mut pot, 2, "Th 4s", 50);
        seat(&mut table, &mut pot, 3, "9c 9d", 200);

        let res = resolve(&mut table, &pot, &HoldemEvaluator, &board).unwrap();
        let won = res.by_player();
        assert_eq!(won[&PlayerId(1)], 75);
        assert_eq!(won[&PlayerId(2)], 75);
        assert_eq!(won[&PlayerId(3)], 150);
        assert!(res.compared);
        assert!(table.get(PlayerId(3)).unwrap().best().is_some());
    }
}
