use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use poker_sim::agents::{BotController, BotProfile};
use poker_sim::config::GameConfig;
use poker_sim::game::Game;
use poker_sim::player::{Player, PlayerId};
use poker_sim::pot::Pot;

fn layered_pot(players: u32) -> Pot {
    let mut pot = Pot::new();
    let mut seats: Vec<Player> =
        (0..players).map(|i| Player::new(PlayerId(i), 100 * u64::from(i + 1))).collect();
    for round in 0..4 {
        for p in &mut seats {
            let amount = (25 * (round + 1)).min(p.wealth());
            // amounts are clamped to the stack
            let _ = pot.commit_bet(p, amount);
        }
        pot.new_round();
    }
    pot
}

fn bench_side_pots(c: &mut Criterion) {
    let mut g = c.benchmark_group("side_pots");
    for players in [2u32, 6, 10] {
        let pot = layered_pot(players);
        g.bench_with_input(BenchmarkId::from_parameter(players), &pot, |b, pot| {
            b.iter(|| black_box(pot).side_pots())
        });
    }
    g.finish();
}

fn bench_play_hand(c: &mut Criterion) {
    c.bench_function("play_hand_6_bots", |b| {
        b.iter(|| {
            let cfg = GameConfig::default().with_capacity(6).with_seed(7);
            let mut game = Game::new(cfg).unwrap();
            let mut bots = BotController::new(BotProfile::default().with_seed(7));
            black_box(game.play_hand(&mut bots).unwrap())
        })
    });
}

criterion_group!(benches, bench_side_pots, bench_play_hand);
criterion_main!(benches);
