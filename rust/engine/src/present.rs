use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::game::Phase;
use crate::hand::Category;
use crate::player::Chips;

/// How a hand ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Hands were compared; `hand` is the winner's shown cards.
    Showdown {
        winner: usize,
        payout: Chips,
        category: Category,
        hand: Deck,
    },
    /// Everyone else folded.
    Walkover { winner: usize, payout: Chips },
    /// The deck ran out mid-hand and every contribution was returned.
    Abandoned { refunded: Chips },
}

impl Outcome {
    pub fn winner(&self) -> Option<usize> {
        match self {
            Outcome::Showdown { winner, .. } | Outcome::Walkover { winner, .. } => Some(*winner),
            Outcome::Abandoned { .. } => None,
        }
    }

    pub fn payout(&self) -> Chips {
        match self {
            Outcome::Showdown { payout, .. } | Outcome::Walkover { payout, .. } => *payout,
            Outcome::Abandoned { .. } => 0,
        }
    }
}

/// Public view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub seat: usize,
    pub name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub active: bool,
    pub cards: usize,
}

/// Read-only view of the table handed to controllers and presentation sinks.
///
/// Only the acting seat's hand is included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hand_number: u32,
    pub phase: Phase,
    pub pot: Chips,
    pub open_bet: Chips,
    pub turn: usize,
    pub first: usize,
    pub rounds_left: u32,
    pub deck_remaining: usize,
    pub seats: Vec<SeatSummary>,
    pub current_hand: Deck,
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    pub fn current_seat(&self) -> Option<&SeatSummary> {
        self.seats.get(self.turn)
    }

    /// Chips the acting seat needs to match the open bet.
    pub fn to_call(&self) -> Chips {
        self.current_seat()
            .map(|s| self.open_bet.saturating_sub(s.bet))
            .unwrap_or(0)
    }

    pub fn active_seats(&self) -> usize {
        self.seats.iter().filter(|s| s.active).count()
    }
}

/// Consumer of table views, typically a renderer.
pub trait PresentationSink {
    /// Called after every step that moved the machine.
    fn render(&mut self, table: &Snapshot);

    /// Called once when the hand reaches its outcome.
    fn finished(&mut self, table: &Snapshot, outcome: &Outcome) {
        let _ = outcome;
        self.render(table);
    }
}

/// Keeps every snapshot it is shown.
#[derive(Debug, Default)]
pub struct Recorder {
    pub frames: Vec<Snapshot>,
}

impl PresentationSink for Recorder {
    fn render(&mut self, table: &Snapshot) {
        self.frames.push(table.clone());
    }
}
