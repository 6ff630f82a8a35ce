//! Seating, dealer button and turn rotation.

use crate::player::{Money, Player, PlayerId, PlayerStatus};
use std::collections::BTreeSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("table is full ({capacity} seats)")]
    Full { capacity: usize },
    #[error("player {0} is already seated")]
    Duplicate(PlayerId),
    #[error("player {0} is not seated")]
    NotSeated(PlayerId),
    #[error("cannot seat player {0} while a hand is in progress")]
    HandInProgress(PlayerId),
}

/// Ordered seats plus the dealer button and the next-to-act cursor.
///
/// Seat order is deal order and action order. Whenever seats exist, both `button` and `cursor`
/// are valid indices into them.
#[derive(Debug, Clone)]
pub struct Table {
    seats: Vec<Player>,
    capacity: usize,
    buy_in: Money,
    button: usize,
    cursor: usize,
}

impl Table {
    pub fn new(capacity: usize, buy_in: Money) -> Self {
        Self { seats: Vec::with_capacity(capacity), capacity, buy_in, button: 0, cursor: 0 }
    }

    /// Seat a new player with the table's buy-in.
    pub fn add_player(&mut self, id: PlayerId) -> Result<(), TableError> {
        self.add_player_with_wealth(id, self.buy_in)
    }

    pub fn add_player_with_wealth(&mut self, id: PlayerId, wealth: Money) -> Result<(), TableError> {
        if self.seats.len() >= self.capacity {
            return Err(TableError::Full { capacity: self.capacity });
        }
        if self.position(id).is_some() {
            return Err(TableError::Duplicate(id));
        }
        self.seats.push(Player::new(id, wealth));
        Ok(())
    }

    /// Unseat a player, keeping button and cursor pointing at the same neighbours.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, TableError> {
        let idx = self.position(id).ok_or(TableError::NotSeated(id))?;
        let player = self.seats.remove(idx);
        let len = self.seats.len();
        let shift = |at: usize| -> usize {
            if len == 0 {
                0
            } else if idx <= at {
                at.checked_sub(1).unwrap_or(len - 1)
            } else {
                at
            }
        };
        self.button = shift(self.button);
        self.cursor = shift(self.cursor);
        Ok(player)
    }

    /// Advance the cursor one seat (wrapping) and return that player.
    ///
    /// No seat is skipped; callers filter on status.
    pub fn next(&mut self) -> Option<&mut Player> {
        if self.seats.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.seats.len();
        self.seats.get_mut(self.cursor)
    }

    /// Rotate the button one seat and park the cursor on it, so the next [`Table::next`]
    /// yields the seat to its left.
    pub fn advance_button(&mut self) {
        if self.seats.is_empty() {
            return;
        }
        self.button = (self.button + 1) % self.seats.len();
        self.cursor = self.button;
    }

    /// Start a new street: every non-folded player who can still bet owes a fresh action.
    ///
    /// All-in players stay `Called`. When fewer than two live players hold chips there is
    /// nobody left to bet against, so nobody is reopened.
    pub fn reset_round(&mut self) {
        let can_bet = self.seats.iter().filter(|p| !p.is_folded() && !p.is_all_in()).count();
        for p in self.seats.iter_mut().filter(|p| !p.is_folded()) {
            p.status = if can_bet >= 2 && !p.is_all_in() {
                PlayerStatus::Active
            } else {
                PlayerStatus::Called
            };
        }
        self.cursor = self.button;
    }

    /// A raise reopens the action for every other live player who still holds chips.
    ///
    /// All-in seats stay `Called`: they have nothing left to answer the raise with.
    pub fn reset_round_player_state(&mut self, raiser: PlayerId) {
        for p in &mut self.seats {
            if p.id != raiser && !p.is_folded() && !p.is_all_in() {
                p.status = PlayerStatus::Active;
            }
        }
    }

    /// End-of-hand cleanup. Wealth is untouched; calling it twice equals calling it once.
    pub fn reset_hand(&mut self) {
        for p in &mut self.seats {
            p.status = PlayerStatus::Active;
            p.hole = None;
            p.best = None;
        }
    }

    /// Seated players whose id is in `ids`, in seat order.
    pub fn get_players(&self, ids: &BTreeSet<PlayerId>) -> Vec<&Player> {
        self.seats.iter().filter(|p| ids.contains(&p.id)).collect()
    }

    /// Sort ids by seat, starting with the seat left of the button. Unseated ids go last.
    pub fn order_from_button(&self, ids: &mut [PlayerId]) {
        let n = self.seats.len().max(1);
        let start = (self.button + 1) % n;
        ids.sort_by_key(|id| match self.position(*id) {
            Some(i) => (0, (i + n - start) % n),
            None => (1, 0),
        });
    }

    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.seats.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.seats.iter_mut().find(|p| p.id == id)
    }

    pub fn players(&self) -> &[Player] {
        &self.seats
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn non_folded_count(&self) -> usize {
        self.seats.iter().filter(|p| !p.is_folded()).count()
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|p| p.status == PlayerStatus::Active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: u32) -> Table {
        let mut t = Table::new(10, 500);
        for i in 0..n {
            t.add_player(PlayerId(i)).unwrap();
        }
        t
    }

    #[test]
    fn rejects_duplicates_and_overflow() {
        let mut t = table(10);
        assert_eq!(t.add_player(PlayerId(99)), Err(TableError::Full { capacity: 10 }));
        let mut t = table(2);
        assert_eq!(t.add_player(PlayerId(1)), Err(TableError::Duplicate(PlayerId(1))));
    }

    #[test]
    fn next_wraps_around_the_table() {
        let mut t = table(3);
        let order: Vec<u32> = (0..4).filter_map(|_| t.next().map(|p| p.id.0)).collect();
        assert_eq!(order, vec![1, 2, 0, 1]);
    }

    #[test]
    fn button_advance_parks_cursor_for_small_blind() {
        let mut t = table(3);
        t.advance_button();
        assert_eq!(t.button(), 1);
        assert_eq!(t.next().map(|p| p.id), Some(PlayerId(2)));
        t.advance_button();
        t.advance_button();
        assert_eq!(t.button(), 0);
    }

    #[test]
    fn removing_the_button_seat_keeps_rotation_fair() {
        let mut t = table(4);
        t.advance_button(); // button on seat 1
        t.remove_player(PlayerId(1)).unwrap();
        t.advance_button();
        assert_eq!(t.players()[t.button()].id, PlayerId(2));
        t.remove_player(PlayerId(0)).unwrap();
        t.remove_player(PlayerId(2)).unwrap();
        t.remove_player(PlayerId(3)).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.button(), 0);
        assert!(t.next().is_none());
    }

    #[test]
    fn raise_reopens_everyone_but_the_raiser() {
        let mut t = table(4);
        for p in t.players_mut() {
            p.status = PlayerStatus::Called;
        }
        t.players_mut()[3].status = PlayerStatus::Folded;
        t.players_mut()[2].wealth = 0;
        t.reset_round_player_state(PlayerId(0));
        let st: Vec<PlayerStatus> = t.players().iter().map(|p| p.status).collect();
        assert_eq!(
            st,
            vec![
                PlayerStatus::Called,
                PlayerStatus::Active,
                PlayerStatus::Called,
                PlayerStatus::Folded
            ]
        );
    }

    #[test]
    fn reset_round_leaves_all_in_players_called() {
        let mut t = table(3);
        t.players_mut()[0].wealth = 0;
        for p in t.players_mut() {
            p.status = PlayerStatus::Called;
        }
        t.reset_round();
        assert_eq!(t.players()[0].status, PlayerStatus::Called);
        assert_eq!(t.players()[1].status, PlayerStatus::Active);

        t.players_mut()[1].wealth = 0;
        t.reset_round();
        assert_eq!(t.active_count(), 0, "one player with chips has nobody to bet against");
    }

    #[test]
    fn reset_hand_is_idempotent_and_keeps_wealth() {
        let mut t = table(3);
        t.players_mut()[0].status = PlayerStatus::Folded;
        t.players_mut()[1].status = PlayerStatus::Called;
        t.players_mut()[1].wealth = 120;
        t.reset_hand();
        let once: Vec<(PlayerStatus, Money)> =
            t.players().iter().map(|p| (p.status, p.wealth)).collect();
        t.reset_hand();
        let twice: Vec<(PlayerStatus, Money)> =
            t.players().iter().map(|p| (p.status, p.wealth)).collect();
        assert_eq!(once, twice);
        assert!(once.iter().all(|(s, _)| *s == PlayerStatus::Active));
        assert_eq!(once[1].1, 120);
    }

    #[test]
    fn get_players_preserves_seat_order() {
        let t = table(5);
        let ids: BTreeSet<PlayerId> = [PlayerId(4), PlayerId(0), PlayerId(2)].into();
        let got: Vec<PlayerId> = t.get_players(&ids).iter().map(|p| p.id).collect();
        assert_eq!(got, vec![PlayerId(0), PlayerId(2), PlayerId(4)]);
    }

    #[test]
    fn order_from_button_starts_left_of_button() {
        let mut t = table(4);
        t.advance_button(); // button on seat 1
        let mut ids = vec![PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3)];
        t.order_from_button(&mut ids);
        assert_eq!(ids, vec![PlayerId(2), PlayerId(3), PlayerId(0), PlayerId(1)]);
    }
}
