//! poker-sim: multi-player Texas Hold'em hand simulator
//!
//! Goals:
//! - Exact chip accounting: side pots under partial all-ins, integer splits with remainders
//! - Explicit hand state machine driven one phase at a time
//! - Deterministic for a given shuffle seed
//! - No panics on bad input or misbehaving players; use `Result` for recoverable errors
//!
//! Players, their decisions and any I/O live behind a [`controller::Controller`].
//!
//! ## Quick start: play a few hands with bots
//! ```
//! use poker_sim::agents::{BotController, BotProfile};
//! use poker_sim::config::GameConfig;
//! use poker_sim::game::Game;
//!
//! let mut game = Game::new(GameConfig::default().with_capacity(4).with_seed(7)).unwrap();
//! let mut bots = BotController::new(BotProfile::default().with_seed(7)).with_supply(4);
//! let played = game.run(&mut bots, 5).unwrap();
//! assert!(played <= 5);
//! let chips: u64 = game.table().players().iter().map(|p| p.wealth()).sum();
//! assert_eq!(chips, 4 * 500);
//! ```
//!
//! ## CLI
//! Run seeded bot hands headless with:
//! ```sh
//! RUST_LOG=info cargo run --bin poker-sim -- --hands 100 --seed 42
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod controller;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod showdown;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
