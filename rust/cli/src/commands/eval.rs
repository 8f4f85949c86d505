//! Eval command: classify cards given as text.

use crate::error::CliError;
use crate::formatters::format_hand;
use crate::validation::parse_cards;
use drawpoker_engine::hand::evaluate_hand;
use std::io::Write;

/// Classify `cards` (e.g. `["As", "Ks", "Qs", "Js", "10s"]`) and print the
/// category and highest rank.
///
/// Any number of distinct cards is accepted; a duplicate or unreadable card
/// is an input error.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards).map_err(CliError::InvalidInput)?;
    if cards.is_empty() {
        return Err(CliError::InvalidInput("no cards given".into()));
    }
    let strength = evaluate_hand(&cards);
    writeln!(out, "Cards: {}", format_hand(&cards))?;
    writeln!(out, "Category: {}", strength.category)?;
    if let Some(high) = strength.high {
        writeln!(out, "High card: {}", high.symbol())?;
    }
    Ok(())
}
