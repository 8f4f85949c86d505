//! # drawpoker-ai: Automated Draw Poker Players
//!
//! Controllers that play a seat without a human. Every controller here
//! implements [`Controller`] and always answers, so an engine seated only
//! with them can be driven with [`Engine::run`](drawpoker_engine::engine::Engine::run).
//!
//! ## Core Components
//!
//! - [`baseline`] - Rule-based AI driven by hand category and pot odds
//! - [`passive`] - Calling station that never folds or draws
//! - [`create_ai`] - Factory building a controller by name
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_ai::create_ai;
//! use drawpoker_engine::engine::{Engine, GameSettings};
//!
//! let seats = vec![
//!     create_ai("baseline").expect("known AI"),
//!     create_ai("passive").expect("known AI"),
//! ];
//! let mut engine = Engine::new(GameSettings::with_seed(42), seats).expect("valid table");
//! let outcome = engine.run().expect("hand completes");
//! println!("outcome: {:?}", outcome);
//! ```

use drawpoker_engine::controller::Controller;

pub mod baseline;
pub mod passive;

/// Names accepted by [`create_ai`].
pub const AI_NAMES: [&str; 2] = ["baseline", "passive"];

/// Build an AI controller by type string.
///
/// Returns `None` for an unknown name.
///
/// ```rust
/// use drawpoker_ai::create_ai;
///
/// let ai = create_ai("baseline").expect("known AI");
/// assert_eq!(ai.name(), "baseline");
/// assert!(create_ai("shark").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn Controller>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        "passive" => Some(Box::new(passive::CallingStation)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpoker_engine::engine::{Engine, GameSettings};

    #[test]
    fn every_named_ai_is_constructible() {
        for name in AI_NAMES {
            let ai = create_ai(name).expect("listed AI");
            assert_eq!(ai.name(), name);
        }
    }

    #[test]
    fn ai_tables_finish_many_hands_without_violations() {
        for seed in 0..40u64 {
            let seats: Vec<Box<dyn Controller>> = (0..4)
                .map(|i| create_ai(AI_NAMES[i % 2]).expect("listed AI"))
                .collect();
            let mut engine = Engine::new(GameSettings::with_seed(seed), seats).expect("valid table");
            for _ in 0..5 {
                engine.run().expect("legal play");
                assert_eq!(engine.ledger().total_chips(), 400);
                if engine.next_hand().is_err() {
                    break;
                }
            }
        }
    }
}
