use crate::config::{ConfigError, GameConfig};
use crate::controller::{Action, Controller, ControllerError};
use crate::deck::{deal_hand, Deal, DealError, DeckLayout, SeededShuffle, ShuffleSource};
use crate::evaluator::{Evaluator, HoldemEvaluator};
use crate::hand::Board;
use crate::player::{Money, PlayerId, PlayerStatus};
use crate::pot::{Pot, PotError};
use crate::showdown::{self, Payout, ShowdownError};
use crate::table::{Table, TableError};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Betting round index, 0 through 3.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Community cards face up during this street.
    pub const fn revealed(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn next(self) -> Option<Street> {
        Street::ALL.get(self.index() + 1).copied()
    }
}

/// Where a hand stands. [`Game::step`] moves exactly one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingPlayers,
    Dealt,
    Betting(Street),
    Showdown,
    HandComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    InvalidBet,
    Dropped,
    Busted,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::Raise => "Raise",
            HandHistoryVerb::InvalidBet => "Invalid bet",
            HandHistoryVerb::Dropped => "Dropped",
            HandHistoryVerb::Busted => "Busted",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub player: PlayerId,
    pub verb: HandHistoryVerb,
    pub amount: Option<Money>,
    pub street: Street,
}

/// Summary of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandOutcome {
    pub hand: u64,
    pub pot: Money,
    pub payouts: Vec<Payout>,
    /// All five community cards, whether or not the hand reached the river.
    pub board: Board,
    /// Chips no seated player could claim; always zero unless stakeholders left mid-hand.
    pub unclaimed: Money,
    /// Whether hands were compared, as opposed to one player being left standing.
    pub showdown: bool,
}

impl HandOutcome {
    /// Total won by `id` across every tier.
    pub fn won_by(&self, id: PlayerId) -> Money {
        self.payouts.iter().filter(|p| p.player == id).map(|p| p.amount).sum()
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("deal failed: {0}")]
    Deal(#[from] DealError),
    #[error(transparent)]
    Pot(#[from] PotError),
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// One table, one pot, and the hand state machine that drives them.
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) table: Table,
    pub(crate) pot: Pot,
    layout: DeckLayout,
    shuffle: Box<dyn ShuffleSource>,
    evaluator: Box<dyn Evaluator>,
    pub(crate) deal: Deal,
    pub(crate) phase: GamePhase,
    pub(crate) street: Street,
    pub(crate) revealed: usize,
    pub(crate) hand_number: u64,
    // players dropped mid-hand; unseated once the hand is settled
    evicted: Vec<PlayerId>,
    pub(crate) history: Vec<HandHistoryEntry>,
    last_outcome: Option<HandOutcome>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("hand", &self.hand_number)
            .field("phase", &self.phase)
            .field("table", &self.table)
            .field("pot", &self.pot.total())
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let shuffle = match config.seed {
            Some(seed) => SeededShuffle::new(seed),
            None => SeededShuffle::from_entropy(),
        };
        Ok(Self {
            table: Table::new(config.capacity, config.buy_in),
            config,
            pot: Pot::new(),
            layout: DeckLayout::standard(),
            shuffle: Box::new(shuffle),
            evaluator: Box::new(HoldemEvaluator),
            deal: Deal::default(),
            phase: GamePhase::AwaitingPlayers,
            street: Street::Preflop,
            revealed: 0,
            hand_number: 0,
            evicted: Vec::new(),
            history: Vec::new(),
            last_outcome: None,
        })
    }

    pub fn with_shuffle(mut self, shuffle: impl ShuffleSource + 'static) -> Self {
        self.shuffle = Box::new(shuffle);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Seat a player directly, bypassing the controller.
    ///
    /// Only allowed between hands; a seat taken mid-hand would have no hole cards.
    pub fn seat(&mut self, id: PlayerId, wealth: Money) -> Result<(), TableError> {
        if self.phase != GamePhase::AwaitingPlayers {
            return Err(TableError::HandInProgress(id));
        }
        self.table.add_player_with_wealth(id, wealth)
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn last_outcome(&self) -> Option<&HandOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn history_recent(&self, n: usize) -> Vec<HandHistoryEntry> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Play until the current hand is settled.
    ///
    /// Returns `None` without touching the table when fewer than two players can be seated.
    pub fn play_hand(
        &mut self,
        ctrl: &mut dyn Controller,
    ) -> Result<Option<HandOutcome>, GameError> {
        let mid_hand = self.phase != GamePhase::AwaitingPlayers;
        let mut phase = self.step(ctrl)?;
        if !mid_hand && phase == GamePhase::AwaitingPlayers {
            return Ok(None);
        }
        while phase != GamePhase::AwaitingPlayers {
            phase = self.step(ctrl)?;
        }
        Ok(self.last_outcome.clone())
    }

    /// Play up to `hands` hands, stopping early once the table cannot start one.
    /// Returns how many were played.
    pub fn run(&mut self, ctrl: &mut dyn Controller, hands: usize) -> Result<usize, GameError> {
        let mut played = 0;
        while played < hands {
            if self.play_hand(ctrl)?.is_none() {
                break;
            }
            played += 1;
        }
        Ok(played)
    }

    /// Advance the hand by one phase and return the phase now current.
    pub fn step(&mut self, ctrl: &mut dyn Controller) -> Result<GamePhase, GameError> {
        self.phase = match self.phase {
            GamePhase::AwaitingPlayers => self.start_hand(ctrl)?,
            GamePhase::Dealt => self.open_street(Street::Preflop),
            GamePhase::Betting(street) => {
                self.betting_round(ctrl)?;
                self.table.reset_round();
                self.pot.new_round();
                match street.next() {
                    Some(next) if self.table.non_folded_count() > 1 => self.open_street(next),
                    _ => GamePhase::Showdown,
                }
            }
            GamePhase::Showdown => self.settle()?,
            GamePhase::HandComplete => self.finish_hand(),
        };
        ctrl.inspect(self, self.phase);
        Ok(self.phase)
    }

    fn open_street(&mut self, street: Street) -> GamePhase {
        self.street = street;
        self.revealed = street.revealed();
        GamePhase::Betting(street)
    }

    fn start_hand(&mut self, ctrl: &mut dyn Controller) -> Result<GamePhase, GameError> {
        let free = self.table.capacity().saturating_sub(self.table.len());
        if free > 0 {
            for id in ctrl.get_new_players(self, free) {
                if let Err(e) = self.table.add_player(id) {
                    warn!("could not seat {id}: {e}");
                }
            }
        }
        if self.table.len() < 2 {
            return Ok(GamePhase::AwaitingPlayers);
        }

        self.table.advance_button();
        self.pot = Pot::new();
        self.history.clear();
        self.street = Street::Preflop;
        self.revealed = 0;
        self.remove_broke_players(ctrl)?;
        if self.table.len() < 2 {
            return Ok(GamePhase::AwaitingPlayers);
        }

        self.hand_number += 1;
        info!(
            "hand {} starting: {} players, button on seat {}",
            self.hand_number,
            self.table.len(),
            self.table.button()
        );
        self.post_blind(self.config.small_blind, HandHistoryVerb::SmallBlind)?;
        self.post_blind(self.config.big_blind, HandHistoryVerb::BigBlind)?;

        let ids: Vec<PlayerId> = self.table.players().iter().map(|p| p.id()).collect();
        self.deal = deal_hand(&self.layout, self.shuffle.as_mut(), &ids)?;
        for p in self.table.players_mut() {
            p.hole = self.deal.hole_cards(p.id);
        }
        Ok(GamePhase::Dealt)
    }

    fn remove_broke_players(&mut self, ctrl: &mut dyn Controller) -> Result<(), GameError> {
        let broke: Vec<PlayerId> =
            self.table.players().iter().filter(|p| p.wealth() == 0).map(|p| p.id()).collect();
        for id in broke {
            if let Some(p) = self.table.get_mut(id) {
                p.fold();
            }
            self.record(id, HandHistoryVerb::Busted, None);
            ctrl.remove_player_from_game(self, id);
            self.table
                .remove_player(id)
                .map_err(|e| GameError::Invariant(format!("removing broke player: {e}")))?;
            debug!("{id} busted and left the table");
        }
        Ok(())
    }

    fn post_blind(&mut self, blind: Money, verb: HandHistoryVerb) -> Result<(), GameError> {
        let Some(player) = self.table.next() else {
            return Err(GameError::Invariant("no player to post a blind".into()));
        };
        let id = player.id();
        let amount = player.wealth().min(blind);
        self.pot.commit_bet(player, amount)?;
        if player.wealth() == 0 {
            player.status = PlayerStatus::Called;
        }
        debug!("{id} posts {} {amount}", verb.label());
        self.record(id, verb, Some(amount));
        Ok(())
    }

    fn bets_needed(&self) -> bool {
        self.table.active_count() >= 1 && self.table.non_folded_count() > 1
    }

    fn betting_round(&mut self, ctrl: &mut dyn Controller) -> Result<(), GameError> {
        while self.bets_needed() {
            let Some(player) = self.table.next() else { break };
            if player.status() != PlayerStatus::Active {
                continue;
            }
            if player.wealth() == 0 {
                player.status = PlayerStatus::Called;
                continue;
            }
            let id = player.id();
            let decision = ctrl.get_player_bet(self, id);
            self.apply(ctrl, id, decision)?;
        }
        Ok(())
    }

    fn apply(
        &mut self,
        ctrl: &mut dyn Controller,
        id: PlayerId,
        decision: Result<Action, ControllerError>,
    ) -> Result<(), GameError> {
        let (wealth, to_call) = match self.table.get(id) {
            Some(p) => (p.wealth(), self.pot.to_call(id)),
            None => return Err(GameError::Invariant(format!("{id} acted without a seat"))),
        };
        match decision {
            Err(e) => {
                warn!("{id}: {e}; folding and removing");
                self.fold(id, HandHistoryVerb::Dropped, None);
                self.evicted.push(id);
                ctrl.remove_player_from_game(self, id);
            }
            Ok(Action::Fold) => self.fold(id, HandHistoryVerb::Fold, None),
            Ok(Action::Call) => self.place_bet(id, to_call.min(wealth))?,
            Ok(Action::Bet(amount)) => {
                let invalid = self.table.get(id).is_some_and(|p| self.pot.bet_invalid(p, amount));
                if invalid {
                    warn!("{id} bet an invalid {amount} (to call {to_call}); folding");
                    ctrl.register_invalid_bet(self, id, amount);
                    self.fold(id, HandHistoryVerb::InvalidBet, Some(amount));
                } else {
                    self.place_bet(id, amount)?;
                }
            }
        }
        Ok(())
    }

    fn fold(&mut self, id: PlayerId, verb: HandHistoryVerb, amount: Option<Money>) {
        if let Some(p) = self.table.get_mut(id) {
            p.fold();
        }
        debug!("{id}: {}", verb.label());
        self.record(id, verb, amount);
    }

    fn place_bet(&mut self, id: PlayerId, amount: Money) -> Result<(), GameError> {
        let facing = self.pot.current_bet();
        let raise = self.pot.raise_amount(id, amount);
        if raise > 0 {
            self.table.reset_round_player_state(id);
        }
        let player = self
            .table
            .get_mut(id)
            .ok_or_else(|| GameError::Invariant(format!("{id} bet without a seat")))?;
        self.pot.commit_bet(player, amount)?;
        player.status = PlayerStatus::Called;

        let verb = match (raise > 0, facing > 0, amount > 0) {
            (true, true, _) => HandHistoryVerb::Raise,
            (true, false, _) => HandHistoryVerb::Bet,
            (false, _, true) => HandHistoryVerb::Call,
            (false, _, false) => HandHistoryVerb::Check,
        };
        debug!("{id}: {} {amount}", verb.label());
        self.record(id, verb, (amount > 0).then_some(amount));
        Ok(())
    }

    fn settle(&mut self) -> Result<GamePhase, GameError> {
        let total = self.pot.total();
        let board = self.deal.board(5);
        let res = showdown::resolve(&mut self.table, &self.pot, self.evaluator.as_ref(), &board)?;
        if res.total_paid() + res.unclaimed != total {
            return Err(GameError::Invariant(format!(
                "pot held {total} but {} was paid out",
                res.total_paid()
            )));
        }
        if res.compared {
            self.revealed = 5;
        }
        for p in &res.payouts {
            let verb = if p.split { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
            self.record(p.player, verb, Some(p.amount));
        }
        info!("hand {} settled: pot {total}, {} payouts", self.hand_number, res.payouts.len());
        self.last_outcome = Some(HandOutcome {
            hand: self.hand_number,
            pot: total,
            payouts: res.payouts,
            board,
            unclaimed: res.unclaimed,
            showdown: res.compared,
        });
        Ok(GamePhase::HandComplete)
    }

    fn finish_hand(&mut self) -> GamePhase {
        self.table.reset_hand();
        for id in std::mem::take(&mut self.evicted) {
            if self.table.remove_player(id).is_err() {
                debug!("{id} already left the table");
            }
        }
        GamePhase::AwaitingPlayers
    }

    fn record(&mut self, player: PlayerId, verb: HandHistoryVerb, amount: Option<Money>) {
        self.history.push(HandHistoryEntry { player, verb, amount, street: self.street });
    }
}
