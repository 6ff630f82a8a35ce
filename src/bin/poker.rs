use clap::Parser;
use log::{error, info};
use poker_sim::agents::{BotController, BotProfile, Difficulty};
use poker_sim::config::GameConfig;
use poker_sim::game::Game;
use std::process::ExitCode;

/// Play seeded bot hands of Texas Hold'em without a UI.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Hands to play; the run also stops once fewer than two players remain.
    #[arg(long, default_value_t = 100)]
    hands: usize,
    /// Bots seated at the start; no new ones join later.
    #[arg(long, default_value_t = 6)]
    players: usize,
    /// Seed for the shuffle and the bots. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 25)]
    small_blind: u64,
    /// Defaults to twice the small blind.
    #[arg(long)]
    big_blind: Option<u64>,
    #[arg(long, default_value_t = 500)]
    buy_in: u64,
    /// Bots play tighter and more aggressively.
    #[arg(long)]
    hard: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = GameConfig::default()
        .with_blinds(args.small_blind)
        .with_buy_in(args.buy_in)
        .with_capacity(args.players);
    if let Some(big) = args.big_blind {
        config = config.with_big_blind(big);
    }
    let mut profile =
        BotProfile::for_difficulty(if args.hard { Difficulty::Hard } else { Difficulty::Medium });
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
        profile = profile.with_seed(seed.wrapping_add(1));
    }

    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut bots = BotController::new(profile).with_supply(args.players);

    match game.run(&mut bots, args.hands) {
        Ok(played) => {
            info!("played {played} hands, {} players left", game.table().len());
            for p in game.table().players() {
                println!("{}\t{}", p.id(), p.wealth());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("hand {} aborted: {e}", game.hand_number());
            ExitCode::FAILURE
        }
    }
}
