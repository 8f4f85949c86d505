//! # drawpoker-engine: Draw Poker Round Engine
//!
//! A step-driven five-card draw engine for two to ten seats. The engine
//! deals, runs betting rounds, discard rounds and the showdown, and pays the
//! pot out, asking one pluggable controller per seat for every decision.
//! Controllers may answer "busy", which lets event-driven front ends drive
//! the engine one step at a time.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and card text
//! - [`deck`] - Ordered, duplicate-free card collections with seeded shuffling
//! - [`hand`] - Hand classification and showdown strength
//! - [`player`] - Player stacks, bets and actions
//! - [`ledger`] - Seat bookkeeping and turn rotation
//! - [`rules`] - Betting action validation
//! - [`game`] - Round phases and transition signals
//! - [`engine`] - The stepping state machine
//! - [`controller`] - The decision-controller contract and built-in controllers
//! - [`present`] - Table snapshots and presentation sinks
//! - [`logger`] - In-memory action history
//! - [`errors`] - Engine invariant violations
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_engine::cards::Card;
//! use drawpoker_engine::hand::{classify, Category};
//!
//! let cards: Vec<Card> = ["9h", "10h", "Jh", "Qh", "Kh"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! assert_eq!(classify(&cards), Category::StraightFlush);
//! ```
//!
//! ## Stepping a Hand
//!
//! ```rust
//! use drawpoker_engine::controller::{Controller, Scripted};
//! use drawpoker_engine::engine::{Engine, GameSettings, Status};
//! use drawpoker_engine::player::PlayerAction;
//!
//! let seats: Vec<Box<dyn Controller>> = vec![
//!     Box::new(Scripted::new()), // busy until it gets decisions
//!     Box::new(Scripted::always(PlayerAction::Check)),
//! ];
//! let mut engine = Engine::new(GameSettings::with_seed(42), seats).unwrap();
//! assert_eq!(engine.step_until_waiting().unwrap(), Status::WaitingOnPlayer);
//! assert_eq!(engine.phase().name(), "BET_CHECK");
//! ```

pub mod cards;
pub mod controller;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod ledger;
pub mod logger;
pub mod player;
pub mod present;
pub mod rules;
