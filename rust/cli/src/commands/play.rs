//! # Play Command
//!
//! Console draw poker. With `--vs human` seat 1 is played from stdin and
//! every other seat by an AI; with `--vs ai` the whole table is automated
//! and the hands are simply narrated.
//!
//! The human seat is an engine [`Channel`] controller. The loop steps the
//! engine until it waits on that seat, prompts for the decision the current
//! phase needs, posts it to the channel and steps again. A rejected action
//! leaves the table untouched, so the player is asked again.
//!
//! Typing `q` ends the session after reporting the hands played. Closing
//! stdin in the middle of a hand is an interruption (exit code 130).

use crate::cli::Vs;
use crate::commands::ai_for_seat;
use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::{
    format_action, format_hand, format_positions, format_record, seat_label, ConsoleSink,
};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{is_quit, parse_card_positions, parse_player_action, ParseResult};
use drawpoker_engine::controller::{Channel, Command, Controller};
use drawpoker_engine::engine::{Engine, Status};
use drawpoker_engine::game::Phase;
use drawpoker_engine::logger::LoggedAction;
use drawpoker_engine::player::PlayerAction;
use drawpoker_engine::present::{PresentationSink, Snapshot};
use drawpoker_engine::rules::{legal_actions, BetContext};
use std::io::{BufRead, Write};
use std::sync::mpsc::Sender;

const HUMAN_SEAT: usize = 0;

enum HandEnd {
    Finished,
    Quit,
}

/// Handle the play command.
///
/// * `vs` - whether seat 1 is the console player or another AI
/// * `hands` - hands to play (default 1); the session also ends once one
///   seat holds every chip or the human seat is broke
/// * `ai` - AI names cycled over the automated seats
pub fn handle_play_command(
    vs: Vs,
    hands: Option<u32>,
    ai: &[String],
    overrides: Overrides,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let resolved = config::load_with_overrides(overrides)?;
    let players = resolved.config.players;
    let mut settings = resolved.settings();
    let seed = settings.seed.unwrap_or_else(rand::random);
    settings.seed = Some(seed);

    let mut seats: Vec<Box<dyn Controller>> = Vec::with_capacity(players);
    let mut human = None;
    for seat in 0..players {
        if seat == HUMAN_SEAT && vs == Vs::Human {
            let (tx, channel) = Channel::new("you");
            human = Some(tx);
            seats.push(Box::new(channel));
        } else {
            seats.push(ai_for_seat(ai, seat)?);
        }
    }
    let mut eng = Engine::new(settings, seats)?;

    writeln!(
        out,
        "play: vs={} hands={} seed={} players={}",
        vs.as_str(),
        hands,
        seed,
        players
    )?;
    let labels: Vec<String> = eng
        .snapshot()
        .seats
        .iter()
        .map(|s| format!("{}={}", seat_label(s.seat), s.name))
        .collect();
    writeln!(out, "Seats: {}", labels.join(" "))?;

    let mut played = 0u32;
    for n in 1..=hands {
        if n > 1 {
            eng.next_hand()?;
        }
        writeln!(out, "Hand {}", n)?;
        match play_hand(&mut eng, human.as_ref(), out, err, stdin)? {
            HandEnd::Quit => break,
            HandEnd::Finished => played += 1,
        }
        if let Some(winner) = eng.match_winner() {
            writeln!(out, "Match over: {} holds every chip", seat_label(winner))?;
            break;
        }
        if human.is_some() && eng.players()[HUMAN_SEAT].stack() == 0 {
            writeln!(out, "You are out of chips.")?;
            break;
        }
    }

    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

fn play_hand(
    eng: &mut Engine,
    human: Option<&Sender<Command>>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HandEnd, CliError> {
    let mut sink = ConsoleSink::new();
    let mut seen = 0;
    let mut answered = false;
    loop {
        let pending = std::mem::take(&mut answered);
        let status = match eng.step() {
            Ok(status) => status,
            // the rejected decision left the table as it was
            Err(e) if pending => {
                ui::write_error(err, &format!("Invalid action: {}", e))?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        seen = print_new_records(eng, seen, human.is_some(), out)?;

        match status {
            Status::InProgress => sink.render(&eng.snapshot()),
            Status::Complete => {
                if let Some(outcome) = eng.outcome().cloned() {
                    sink.finished(&eng.snapshot(), &outcome);
                }
                flush(&mut sink, out)?;
                return Ok(HandEnd::Finished);
            }
            Status::WaitingOnPlayer => {
                flush(&mut sink, out)?;
                let table = eng.snapshot();
                let Some(tx) = human else {
                    return Err(CliError::Engine(format!(
                        "{} did not answer in {}",
                        seat_label(table.turn),
                        table.phase
                    )));
                };
                let Some(cmd) = ask_human(&table, out, err, stdin)? else {
                    return Ok(HandEnd::Quit);
                };
                tx.send(cmd)
                    .map_err(|_| CliError::Engine("human seat disconnected".into()))?;
                answered = true;
            }
        }
        flush(&mut sink, out)?;
    }
}

fn flush(sink: &mut ConsoleSink, out: &mut dyn Write) -> Result<(), CliError> {
    for line in sink.take_lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn print_new_records(
    eng: &Engine,
    seen: usize,
    has_human: bool,
    out: &mut dyn Write,
) -> Result<usize, CliError> {
    let records = eng.history().records();
    for r in records.iter().skip(seen) {
        writeln!(out, "{}", format_record(r))?;
        if has_human && r.seat == HUMAN_SEAT && matches!(r.action, LoggedAction::Discard { .. }) {
            let hand = &eng.players()[HUMAN_SEAT].hand;
            writeln!(out, "You now hold {}", format_hand(hand.cards()))?;
        }
    }
    Ok(records.len())
}

/// Prompt until the player gives a decision for the current phase.
///
/// `Ok(None)` means the player asked to quit.
fn ask_human(
    table: &Snapshot,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<Command>, CliError> {
    let hand = table.current_hand.cards();
    let seat = table
        .current_seat()
        .ok_or_else(|| CliError::Engine(format!("no seat {} at the table", table.turn)))?;
    loop {
        match table.phase {
            Phase::BetCheck | Phase::BetOpen => {
                writeln!(
                    out,
                    "Your hand: {}  pot={} to call={} stack={}",
                    format_hand(hand),
                    table.pot,
                    table.to_call(),
                    seat.stack
                )?;
                let ctx = BetContext {
                    seat: seat.seat,
                    open_bet: table.open_bet,
                    committed: seat.bet,
                    stack: seat.stack,
                };
                let legal: Vec<String> = legal_actions(&ctx)
                    .iter()
                    .map(|a| match a {
                        PlayerAction::Raise(min) => format!("raise {}+", min),
                        other => format_action(other),
                    })
                    .collect();
                ui::prompt(out, &format!("Action ({}, q): ", legal.join(", ")))?;
            }
            Phase::Discard => {
                writeln!(out, "Your hand: {}", format_positions(hand))?;
                ui::prompt(out, "Discard positions (blank to stand pat, q): ")?;
            }
            Phase::Show => {
                writeln!(out, "Your hand: {}", format_positions(hand))?;
                ui::prompt(out, "Show positions (blank shows all, q): ")?;
            }
            other => {
                return Err(CliError::Engine(format!("no input expected in {}", other)));
            }
        }

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Err(CliError::Interrupted("input closed mid-hand".into()));
        };
        if is_quit(&line) {
            return Ok(None);
        }
        let parsed = match table.phase {
            Phase::Discard => parse_card_positions(&line, hand.len()).map(Command::Discard),
            Phase::Show if line.is_empty() => Ok(Command::Show(None)),
            Phase::Show => parse_card_positions(&line, hand.len()).map(|ix| Command::Show(Some(ix))),
            _ => match parse_player_action(&line) {
                ParseResult::Action(a) => Ok(Command::Bet(a)),
                ParseResult::Quit => return Ok(None),
                ParseResult::Invalid(msg) => Err(msg),
            },
        };
        match parsed {
            Ok(cmd) => return Ok(Some(cmd)),
            Err(msg) => ui::write_error(err, &msg)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn play(vs: Vs, hands: u32, input: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.to_string());
        let overrides = Overrides {
            seed: Some(11),
            players: Some(2),
            ..Overrides::default()
        };
        let ai = vec!["passive".to_string()];
        let res = handle_play_command(vs, Some(hands), &ai, overrides, &mut out, &mut err, &mut stdin);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn test_human_plays_a_full_hand() {
        let (res, out, err) = play(Vs::Human, 1, "check\n1 2\ncheck\n\n");
        assert!(res.is_ok(), "stderr: {err}");
        assert!(out.contains("Seats: P1=you P2=passive"));
        assert!(out.contains("P1 checks"));
        assert!(out.contains("P1 draws 2"));
        assert!(out.contains("You now hold ["));
        assert!(out.contains("P2 stands pat"));
        assert!(out.contains("-- SHOW"));
        assert!(out.contains(" wins 0 with "));
        assert!(out.contains("Hands played: 1"));
    }

    #[test]
    #[serial]
    fn test_bad_input_and_illegal_action_are_asked_again() {
        let (res, out, err) = play(Vs::Human, 1, "dance\ncall\ncheck\n\ncheck\n\n");
        assert!(res.is_ok(), "stderr: {err}");
        assert!(err.contains("Unrecognized action 'dance'"));
        assert!(err.contains("Invalid action"));
        assert!(out.contains("P1 stands pat"));
        assert!(out.contains("Hands played: 1"));
    }

    #[test]
    #[serial]
    fn test_quit_ends_the_session_cleanly() {
        let (res, out, _) = play(Vs::Human, 3, "q\n");
        assert!(res.is_ok());
        assert!(out.contains("Hands played: 0"));
    }

    #[test]
    #[serial]
    fn test_closed_stdin_is_an_interruption() {
        let (res, _, _) = play(Vs::Human, 1, "");
        assert!(matches!(res, Err(CliError::Interrupted(_))));
    }

    #[test]
    #[serial]
    fn test_ai_table_needs_no_input() {
        let (res, out, _) = play(Vs::Ai, 3, "");
        assert!(res.is_ok());
        assert!(out.contains("Seats: P1=passive P2=passive"));
        assert!(out.contains("Hand 3"));
        assert!(out.contains("Hands played: 3"));
    }

    #[test]
    #[serial]
    fn test_zero_hands_is_rejected() {
        let (res, _, err) = play(Vs::Ai, 0, "");
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("hands must be >= 1"));
    }
}
