//! Input parsing and validation for interactive commands.
//!
//! Handles betting actions typed at the prompt, card positions picked for a
//! discard or a show, and card text given on the command line.

use drawpoker_engine::cards::Card;
use drawpoker_engine::player::PlayerAction;
use std::collections::HashSet;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Whether the line asks to leave the session.
pub fn is_quit(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "q" | "quit")
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "k" or "check" → Check
/// - "c" or "call" → Call
/// - "r X", "raise X" or "bet X" → Raise the open bet to X
/// - "f" or "fold" → Fold
/// - "allin" or "all-in" → All-in
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use drawpoker_cli::validation::{parse_player_action, ParseResult};
/// use drawpoker_engine::player::PlayerAction;
///
/// assert_eq!(
///     parse_player_action("raise 20"),
///     ParseResult::Action(PlayerAction::Raise(20))
/// );
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("invalid") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    if is_quit(parts[0]) {
        return ParseResult::Quit;
    }

    match parts[0] {
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "k" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "allin" | "all-in" => ParseResult::Action(PlayerAction::AllIn),
        "raise" | "r" | "bet" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Raise requires the new open bet (e.g., 'raise 20')".to_string(),
                );
            }
            match parts[1].parse::<u32>() {
                Ok(amount) if amount > 0 => ParseResult::Action(PlayerAction::Raise(amount)),
                Ok(_) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: check, call, raise <amount>, fold, allin, q",
            parts[0]
        )),
    }
}

/// Parse 1-based card positions typed at a discard or show prompt.
///
/// Positions may be separated by spaces or commas. A blank line selects
/// nothing. Returns 0-based indices in ascending order.
///
/// ```rust
/// # use drawpoker_cli::validation::parse_card_positions;
/// assert_eq!(parse_card_positions("3, 1", 5), Ok(vec![0, 2]));
/// assert_eq!(parse_card_positions("", 5), Ok(vec![]));
/// assert!(parse_card_positions("6", 5).is_err());
/// ```
pub fn parse_card_positions(input: &str, hand_len: usize) -> Result<Vec<usize>, String> {
    let mut picked = Vec::new();
    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let pos: usize = token
            .parse()
            .map_err(|_| format!("'{}' is not a card position", token))?;
        if pos == 0 || pos > hand_len {
            return Err(format!("card position must be 1-{}, got {}", hand_len, pos));
        }
        if picked.contains(&(pos - 1)) {
            return Err(format!("card position {} given twice", pos));
        }
        picked.push(pos - 1);
    }
    picked.sort_unstable();
    Ok(picked)
}

/// Parse card text such as `As 10h qd`, rejecting duplicates.
pub fn parse_cards<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Card>, String> {
    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(texts.len());
    for text in texts {
        let card: Card = text.as_ref().parse().map_err(|e| format!("{}", e))?;
        if !seen.insert(card) {
            return Err(format!("duplicate card {}", card));
        }
        cards.push(card);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_actions() {
        assert_eq!(
            parse_player_action("check"),
            ParseResult::Action(PlayerAction::Check)
        );
        assert_eq!(
            parse_player_action("  CALL "),
            ParseResult::Action(PlayerAction::Call)
        );
        assert_eq!(
            parse_player_action("f"),
            ParseResult::Action(PlayerAction::Fold)
        );
        assert_eq!(
            parse_player_action("all-in"),
            ParseResult::Action(PlayerAction::AllIn)
        );
        assert_eq!(
            parse_player_action("bet 15"),
            ParseResult::Action(PlayerAction::Raise(15))
        );
        assert_eq!(parse_player_action("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn test_parse_raise_errors() {
        assert!(matches!(parse_player_action("raise"), ParseResult::Invalid(_)));
        assert!(matches!(
            parse_player_action("raise 0"),
            ParseResult::Invalid(m) if m.contains("positive")
        ));
        assert!(matches!(
            parse_player_action("raise lots"),
            ParseResult::Invalid(m) if m.contains("Invalid raise")
        ));
        assert!(matches!(parse_player_action(""), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_card_positions() {
        assert_eq!(parse_card_positions("5 4 1", 5), Ok(vec![0, 3, 4]));
        assert!(parse_card_positions("0", 5).is_err());
        assert!(parse_card_positions("2 2", 5).is_err());
        assert!(parse_card_positions("x", 5).is_err());
    }

    #[test]
    fn test_parse_cards() {
        let cards = parse_cards(&["As", "10h", "Td"]).unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].to_string(), "10h");
        assert!(parse_cards(&["As", "as"]).unwrap_err().contains("duplicate"));
        assert!(parse_cards(&["1x"]).is_err());
    }
}
