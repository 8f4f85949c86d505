use thiserror::Error;

use crate::player::Chips;

/// Engine invariant violations.
///
/// Every variant except [`GameError::InvalidCard`] indicates a bug in a
/// controller or the engine itself, never an ordinary game event. A
/// controller that is not ready yet is reported through the step status,
/// not through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("deck must hold all 52 cards before dealing, found {found}")]
    DeckNotFull { found: usize },
    #[error("player {seat} still holds cards; reset hands before dealing")]
    HandNotEmpty { seat: usize },
    #[error("deck exhausted: needed {needed} cards, {remaining} remaining")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("cannot draw from an empty card collection")]
    EmptyDeck,
    #[error("player {seat} cannot check while owing {owed}; call, raise or fold")]
    CheckAgainstBet { seat: usize, owed: Chips },
    #[error("player {seat} cannot call: nothing to call, check instead")]
    NothingToCall { seat: usize },
    #[error("raise to {amount} must exceed the open bet of {current}")]
    RaiseTooSmall { amount: Chips, current: Chips },
    #[error("player {seat} cannot fold when checking is available")]
    FoldWhenCheckAvailable { seat: usize },
    #[error("player {seat} charged {amount} with only {stack} in stack")]
    Overcharge {
        seat: usize,
        amount: Chips,
        stack: Chips,
    },
    #[error("player {seat} has already folded")]
    PlayerAlreadyFolded { seat: usize },
    #[error("no player at seat {seat}")]
    UnknownSeat { seat: usize },
    #[error("need at least 2 players, have {count}")]
    NotEnoughPlayers { count: usize },
    #[error("hand still in progress")]
    HandInProgress,
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },
    #[error("cannot parse card '{text}'")]
    InvalidCard { text: String },
}
