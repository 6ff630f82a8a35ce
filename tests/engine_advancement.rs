mod common;

use common::seated;
use poker_sim::agents::ScriptedController;
use poker_sim::controller::{Action, Controller, ControllerError};
use poker_sim::engine::GameView;
use poker_sim::game::{GamePhase, Street};
use poker_sim::player::{Money, PlayerId};

const ROYAL_BOARD: &str = "2c 3d 4c 5d 2d 3c As Ks Qs Js Ts";

#[test]
fn step_walks_every_phase_of_a_checked_down_hand() {
    let mut game = seated(&[500, 500, 500], ROYAL_BOARD);
    let mut ctrl = ScriptedController::new();

    let mut phases = vec![game.phase()];
    loop {
        let phase = game.step(&mut ctrl).unwrap();
        phases.push(phase);
        if phase == GamePhase::AwaitingPlayers {
            break;
        }
    }
    assert_eq!(
        phases,
        vec![
            GamePhase::AwaitingPlayers,
            GamePhase::Dealt,
            GamePhase::Betting(Street::Preflop),
            GamePhase::Betting(Street::Flop),
            GamePhase::Betting(Street::Turn),
            GamePhase::Betting(Street::River),
            GamePhase::Showdown,
            GamePhase::HandComplete,
            GamePhase::AwaitingPlayers,
        ]
    );
    assert_eq!(ctrl.phases(), &phases[1..], "inspect sees every transition");
}

#[test]
fn everyone_folding_jumps_straight_to_showdown() {
    let mut game = seated(&[500, 500, 500], ROYAL_BOARD);
    let mut ctrl = ScriptedController::new()
        .script(PlayerId(1), [Action::Fold])
        .script(PlayerId(2), [Action::Fold]);

    game.play_hand(&mut ctrl).unwrap().expect("hand played");

    assert_eq!(
        ctrl.phases(),
        &[
            GamePhase::Dealt,
            GamePhase::Betting(Street::Preflop),
            GamePhase::Showdown,
            GamePhase::HandComplete,
            GamePhase::AwaitingPlayers,
        ]
    );
}

#[test]
fn all_in_players_run_the_board_without_being_asked() {
    let mut game = seated(&[500, 500], "2c 3d 4c 5d As Ks Qs Js Ts");
    let mut ctrl = ScriptedController::new()
        .script(PlayerId(0), [Action::Bet(475)])
        .script(PlayerId(1), [Action::Call]);

    let outcome = game.play_hand(&mut ctrl).unwrap().expect("hand played");

    assert_eq!(ctrl.asked(), &[PlayerId(0), PlayerId(1)]);
    assert_eq!(ctrl.phases().len(), 8, "every street is still walked");
    assert!(outcome.showdown);
    assert_eq!(outcome.pot, 1000);
}

#[test]
fn play_hand_finishes_a_hand_already_in_progress() {
    let mut game = seated(&[500, 500, 500], ROYAL_BOARD);
    let mut ctrl = ScriptedController::new();
    game.step(&mut ctrl).unwrap();
    game.step(&mut ctrl).unwrap();
    assert_eq!(game.phase(), GamePhase::Betting(Street::Preflop));

    let outcome = game.play_hand(&mut ctrl).unwrap().expect("hand finished");
    assert_eq!(outcome.hand, 1);
    assert_eq!(game.phase(), GamePhase::AwaitingPlayers);
}

#[test]
fn run_stops_when_the_table_cannot_start_a_hand() {
    let mut game = seated(&[500, 500], "2c 3d Ac Ad Kh Qh 7s 4d 9c");
    // seat 0 shoves every hand into aces and busts on the first one
    let mut ctrl = ScriptedController::new().script(PlayerId(0), [Action::Bet(475)]);

    let played = game.run(&mut ctrl, 10).unwrap();

    assert_eq!(played, 1);
    assert_eq!(game.table().len(), 1);
    assert_eq!(ctrl.removed(), &[PlayerId(0)]);
}

/// Records what the view exposes each time a decision is requested.
#[derive(Default)]
struct Watcher {
    seen: Vec<(Street, usize, Money, bool)>,
}

impl Controller for Watcher {
    fn get_new_players(&mut self, _game: &dyn GameView, _n: usize) -> Vec<PlayerId> {
        Vec::new()
    }

    fn remove_player_from_game(&mut self, _game: &dyn GameView, _id: PlayerId) {}

    fn get_player_bet(
        &mut self,
        game: &dyn GameView,
        id: PlayerId,
    ) -> Result<Action, ControllerError> {
        let sees_own_cards = game.hole_cards(id).is_some();
        self.seen.push((game.street(), game.board().len(), game.pot_total(), sees_own_cards));
        Ok(Action::Call)
    }

    fn register_invalid_bet(&mut self, _game: &dyn GameView, _id: PlayerId, _amount: Money) {}
}

#[test]
fn view_reveals_the_board_street_by_street() {
    let mut game = seated(&[500, 500], "2c 3d 4c 5d As Ks Qs Js Ts");
    let mut watcher = Watcher::default();

    game.play_hand(&mut watcher).unwrap().expect("hand played");

    let streets: Vec<(Street, usize)> = watcher.seen.iter().map(|s| (s.0, s.1)).collect();
    assert_eq!(
        streets,
        vec![
            (Street::Preflop, 0),
            (Street::Preflop, 0),
            (Street::Flop, 3),
            (Street::Flop, 3),
            (Street::Turn, 4),
            (Street::Turn, 4),
            (Street::River, 5),
            (Street::River, 5),
        ]
    );
    assert_eq!(watcher.seen[0].2, 75, "both blinds are in before the first decision");
    assert!(watcher.seen.iter().all(|s| s.3));
    assert_eq!(game.big_blind(), 50);
}
