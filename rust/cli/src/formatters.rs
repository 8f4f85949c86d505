//! Text rendering of cards, actions and table state for the console.
//!
//! Suits are drawn with Unicode symbols where the terminal is known to cope
//! and with their letters otherwise.

use drawpoker_engine::cards::{Card, Suit};
use drawpoker_engine::game::Phase;
use drawpoker_engine::logger::{ActionRecord, LoggedAction};
use drawpoker_engine::player::PlayerAction;
use drawpoker_engine::present::{Outcome, PresentationSink, SeatSummary, Snapshot};
use drawpoker_engine::rules::ValidatedAction;

pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.letter().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(&card.suit))
}

/// Cards in brackets, e.g. `[A♠ 10♥ 3♣]`.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Cards with their 1-based positions, for discard and show prompts.
pub fn format_positions(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i + 1, format_card(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn seat_label(seat: usize) -> String {
    format!("P{}", seat + 1)
}

pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(to) => format!("raise {}", to),
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

/// One line of the hand log.
pub fn format_record(record: &ActionRecord) -> String {
    let who = seat_label(record.seat);
    match &record.action {
        LoggedAction::Bet(ValidatedAction::Check) => format!("{} checks", who),
        LoggedAction::Bet(ValidatedAction::Call(cost)) => format!("{} calls {}", who, cost),
        LoggedAction::Bet(ValidatedAction::Raise { to, .. }) => {
            format!("{} raises to {}", who, to)
        }
        LoggedAction::Bet(ValidatedAction::Fold) => format!("{} folds", who),
        LoggedAction::Bet(ValidatedAction::AllIn(cost)) => {
            format!("{} goes all-in for {}", who, cost)
        }
        LoggedAction::Discard { count: 0 } => format!("{} stands pat", who),
        LoggedAction::Discard { count } => format!("{} draws {}", who, count),
        LoggedAction::Show { category } => format!("{} shows {}", who, category),
    }
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Showdown {
            winner,
            payout,
            category,
            hand,
        } => format!(
            "{} wins {} with {} {}",
            seat_label(*winner),
            payout,
            category,
            format_hand(hand.cards())
        ),
        Outcome::Walkover { winner, payout } => {
            format!("{} wins {} uncontested", seat_label(*winner), payout)
        }
        Outcome::Abandoned { refunded } => {
            format!("Hand abandoned: deck exhausted, {} refunded", refunded)
        }
    }
}

pub fn format_stacks(seats: &[SeatSummary]) -> String {
    let parts: Vec<String> = seats
        .iter()
        .map(|s| format!("{}={}", seat_label(s.seat), s.stack))
        .collect();
    format!("Stacks: {}", parts.join(" "))
}

/// Presentation sink that turns table views into console lines.
///
/// A header is emitted each time the table enters a new decision phase and
/// the outcome when the hand finishes. Lines are buffered until
/// [`ConsoleSink::take_lines`] so rendering never fails mid-step.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    lines: Vec<String>,
    last: Option<Phase>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl PresentationSink for ConsoleSink {
    fn render(&mut self, table: &Snapshot) {
        let phase = table.phase;
        if phase.awaits_controller() && self.last != Some(phase) {
            self.lines.push(format!(
                "-- {} pot={} open bet={}",
                phase, table.pot, table.open_bet
            ));
            self.last = Some(phase);
        }
    }

    fn finished(&mut self, table: &Snapshot, outcome: &Outcome) {
        self.lines.push(format_outcome(outcome));
        self.lines.push(format_stacks(&table.seats));
        self.last = None;
    }
}
