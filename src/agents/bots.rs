use crate::cards::Card;
use crate::controller::{Action, Controller, ControllerError};
use crate::engine::GameView;
use crate::evaluator::{evaluate_five, evaluate_seven, Evaluation};
use crate::hand::{Board, HoleCards};
use crate::player::{Money, PlayerId};
use log::debug;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03),
            Difficulty::Medium => (0.5, 0.35, 0.05),
            Difficulty::Hard => (0.62, 0.48, 0.08),
        };
        Self { difficulty, tightness, aggression, bluff, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

/// Seats numbered bots and plays every one of them with the same profile.
///
/// Entrants are handed out as `P0, P1, ...` until the optional supply runs dry, so a table of
/// bots eventually busts down to a single winner.
#[derive(Debug)]
pub struct BotController {
    profile: BotProfile,
    rng: StdRng,
    next_id: u32,
    supply: Option<usize>,
    removed: Vec<PlayerId>,
}

impl BotController {
    pub fn new(profile: BotProfile) -> Self {
        let rng = match profile.rng_seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { profile, rng, next_id: 0, supply: None, removed: Vec::new() }
    }

    /// Stop handing out entrants after `n` in total.
    pub fn with_supply(mut self, n: usize) -> Self {
        self.supply = Some(n);
        self
    }

    /// Players that have left the game, in order.
    pub fn removed(&self) -> &[PlayerId] {
        &self.removed
    }

    fn decide(&mut self, ctx: &BotContext<'_>) -> Action {
        // Heads-up preflop: never fold the small blind to the big blind.
        if ctx.num_players == 2 && ctx.board.is_empty() && ctx.to_call <= ctx.big_blind {
            return Action::Call;
        }

        let p = &self.profile;
        let strength = estimate_strength(ctx.hole, ctx.board);
        let noise = self.rng.random_range(-1.0..=1.0) * mistake_rate(p.difficulty);
        let adjusted = (strength + noise).clamp(0.0, 1.0);
        let pot_odds = if ctx.to_call == 0 {
            0.0
        } else {
            ctx.to_call as f64 / (ctx.pot + ctx.to_call) as f64
        };
        let fold_threshold = (0.35 + p.tightness * 0.3 - pot_odds * 0.25).clamp(0.1, 0.9);
        let raise_threshold = (0.68 - p.aggression * 0.25).clamp(0.15, 0.9);

        if ctx.to_call > 0 && adjusted < fold_threshold {
            return Action::Fold;
        }
        let value = adjusted > raise_threshold && self.rng.random::<f64>() < p.aggression;
        let bluff = ctx.to_call == 0 && self.rng.random::<f64>() < p.bluff;
        if value || bluff {
            return Action::Bet(bet_size(ctx, p.aggression, adjusted));
        }
        Action::Call
    }
}

impl Controller for BotController {
    fn get_new_players(&mut self, _game: &dyn GameView, n: usize) -> Vec<PlayerId> {
        let n = self.supply.map_or(n, |left| left.min(n));
        if let Some(left) = self.supply.as_mut() {
            *left -= n;
        }
        let first = self.next_id;
        self.next_id += n as u32;
        (first..self.next_id).map(PlayerId).collect()
    }

    fn remove_player_from_game(&mut self, game: &dyn GameView, id: PlayerId) {
        debug!("{id} leaves after hand {}", game.hand_number());
        self.removed.push(id);
    }

    fn get_player_bet(
        &mut self,
        game: &dyn GameView,
        id: PlayerId,
    ) -> Result<Action, ControllerError> {
        let hole = game
            .hole_cards(id)
            .ok_or_else(|| ControllerError::Malformed(format!("{id} was asked without cards")))?;
        let board = game.board();
        let ctx = BotContext {
            num_players: game.players().iter().filter(|p| !p.is_folded()).count(),
            to_call: game.to_call(id),
            pot: game.pot_total(),
            big_blind: game.big_blind(),
            stack: game.wealth(id).unwrap_or(0),
            hole: &hole,
            board: &board,
        };
        Ok(self.decide(&ctx))
    }

    fn register_invalid_bet(&mut self, _game: &dyn GameView, id: PlayerId, amount: Money) {
        debug!("bot {id} made an invalid bet of {amount}");
    }
}

struct BotContext<'a> {
    num_players: usize,
    to_call: Money,
    pot: Money,
    big_blind: Money,
    stack: Money,
    hole: &'a HoleCards,
    board: &'a Board,
}

fn mistake_rate(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.05,
        Difficulty::Medium => 0.025,
        Difficulty::Hard => 0.015,
    }
}

/// Chips to put in: the call plus a raise scaled to the pot, capped at the stack.
fn bet_size(ctx: &BotContext<'_>, aggression: f64, strength: f64) -> Money {
    if strength > 0.88 && ctx.stack <= ctx.pot.saturating_add(ctx.to_call) {
        return ctx.stack;
    }
    let base_factor = if strength > 0.8 {
        0.9
    } else if strength > 0.6 {
        0.6
    } else {
        0.33
    };
    let scale = 0.8 + aggression * 0.4;
    let raise = ((ctx.pot as f64) * base_factor * scale).round() as Money;
    (ctx.to_call + raise.max(ctx.big_blind)).min(ctx.stack)
}

fn estimate_strength(hole: &HoleCards, board: &Board) -> f64 {
    let board_cards = board.as_slice();
    let mut cards = Vec::with_capacity(2 + board_cards.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board_cards);
    match best_eval(&cards) {
        Some(eval) => {
            let base = f64::from(eval.category.ordinal()) / 8.0;
            let high = f64::from(eval.best_five[0].rank().value()) / 14.0;
            (base * 0.85 + high * 0.15).clamp(0.0, 1.0)
        }
        None => preflop_strength(hole),
    }
}

fn best_eval(cards: &[Card]) -> Option<Evaluation> {
    match cards.len() {
        5 => Some(evaluate_five(cards.try_into().ok()?)),
        6 => (0..6)
            .filter_map(|skip| {
                let five: Vec<Card> =
                    cards.iter().enumerate().filter(|&(i, _)| i != skip).map(|(_, &c)| c).collect();
                Some(evaluate_five(five.as_slice().try_into().ok()?))
            })
            .max(),
        7 => Some(evaluate_seven(cards.try_into().ok()?)),
        _ => None,
    }
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = i32::from(hole.first().rank().value());
    let b = i32::from(hole.second().rank().value());
    let high = f64::from(a.max(b));
    let low = f64::from(a.min(b));
    let gap = (a - b).abs();

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if a == b {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if hole.first().suit() == hole.second().suit() {
        score += 0.05;
    }
    match gap {
        1 => score += 0.05,
        2 => score += 0.02,
        g if g > 4 => score -= 0.05,
        _ => {}
    }
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    #[test]
    fn pocket_aces_beat_seven_deuce_preflop() {
        assert!(preflop_strength(&hole("As Ah")) > preflop_strength(&hole("7c 2d")));
    }

    #[test]
    fn made_hands_score_by_category() {
        let board: Board = "Ks Qs Js 3d".parse().unwrap();
        let flush_draw = estimate_strength(&hole("Ts 9s"), &board);
        let nothing = estimate_strength(&hole("4c 5h"), &board);
        assert!(flush_draw > nothing);
    }

    #[test]
    fn supply_limits_entrants() {
        let mut bots = BotController::new(BotProfile::default().with_seed(1)).with_supply(3);
        let game = crate::game::Game::new(crate::config::GameConfig::default()).unwrap();
        assert_eq!(bots.get_new_players(&game, 2), vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(bots.get_new_players(&game, 5), vec![PlayerId(2)]);
        assert!(bots.get_new_players(&game, 5).is_empty());
    }

    #[test]
    fn bets_never_exceed_the_stack() {
        let h = hole("As Ah");
        let board = Board::default();
        let ctx = BotContext {
            num_players: 4,
            to_call: 50,
            pot: 10_000,
            big_blind: 50,
            stack: 120,
            hole: &h,
            board: &board,
        };
        assert_eq!(bet_size(&ctx, 0.9, 0.95), 120);
        assert!(bet_size(&ctx, 0.1, 0.2) <= 120);
    }
}
