//! akq-rs: a one-round Ace/King/Queen betting game against a heuristic opponent
//!
//! Goals:
//! - The round engine owns all rules: toss, deal, legal actions, pot, resolution
//! - The opponent is a lookup table of per-card probabilities, not a solver
//! - All randomness is injected, so every branch can be forced in tests
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play a round
//! ```
//! use akq_rs::cards::Card;
//! use akq_rs::game::{Action, Role, RoundState, Side};
//! use akq_rs::policy::PolicyTable;
//! use akq_rs::rng::ScriptedRng;
//!
//! let mut round = RoundState::with_cards(Card::Ace, Card::King, Role::Player1).unwrap();
//! round.apply_action(Action::Bet).unwrap();
//!
//! // The King calls against a bet only on draws below 0.4.
//! let mut rng = ScriptedRng::constant(0.99);
//! let reply = round.play_opponent(&PolicyTable::default(), &mut rng).unwrap();
//! assert_eq!(reply, Action::Fold);
//!
//! let outcome = round.resolve().unwrap();
//! assert_eq!(outcome.winner_side, Side::Human);
//! assert_eq!(outcome.pot, 3);
//! assert_eq!(outcome.reason.to_string(), "Computer Folded");
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin akq-rs -- --seed 7
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod game;
pub mod policy;
pub mod rng;
pub mod session;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
