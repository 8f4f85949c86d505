//! Sim command: automated hands between AI seats.
//!
//! Hands are played back to back at one table. When a seat wins every chip
//! the table is rebuilt with fresh stacks and the next seed, so `--hands`
//! is always honoured. Wins are tallied per seat.

use crate::commands::ai_for_seat;
use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::{seat_label, ConsoleSink};
use drawpoker_engine::controller::Controller;
use drawpoker_engine::engine::{Engine, GameSettings};
use drawpoker_engine::present::Outcome;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Tally {
    wins: Vec<u32>,
    showdowns: u32,
    walkovers: u32,
    abandoned: u32,
    biggest_pot: u32,
    tables: u32,
}

impl Tally {
    fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            tables: 1,
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Showdown { winner, .. } => {
                self.showdowns += 1;
                self.wins[*winner] += 1;
            }
            Outcome::Walkover { winner, .. } => {
                self.walkovers += 1;
                self.wins[*winner] += 1;
            }
            Outcome::Abandoned { .. } => self.abandoned += 1,
        }
        self.biggest_pot = self.biggest_pot.max(outcome.payout());
    }
}

fn build_table(
    settings: GameSettings,
    players: usize,
    ai: &[String],
) -> Result<Engine, CliError> {
    let seats = (0..players)
        .map(|seat| ai_for_seat(ai, seat))
        .collect::<Result<Vec<Box<dyn Controller>>, CliError>>()?;
    Ok(Engine::new(settings, seats)?)
}

pub fn handle_sim_command(
    hands: u32,
    ai: &[String],
    verbose: bool,
    overrides: Overrides,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let resolved = config::load_with_overrides(overrides)?;
    let players = resolved.config.players;
    let mut settings = resolved.settings();
    let seed = settings.seed.unwrap_or_else(rand::random);
    settings.seed = Some(seed);

    let mut eng = build_table(settings.clone(), players, ai)?;
    let names: Vec<String> = eng.snapshot().seats.into_iter().map(|s| s.name).collect();
    writeln!(
        out,
        "sim: hands={} seed={} players={} ai={}",
        hands,
        seed,
        players,
        names.join(",")
    )?;

    let mut tally = Tally::new(players);
    let mut sink = ConsoleSink::new();
    for n in 1..=hands {
        if n > 1 {
            if eng.match_winner().is_some() {
                settings.seed = Some(seed.wrapping_add(u64::from(tally.tables)));
                tally.tables += 1;
                debug!(table = tally.tables, "rebuilding table");
                eng = build_table(settings.clone(), players, ai)?;
            } else {
                eng.next_hand()?;
            }
        }
        let outcome = if verbose {
            writeln!(out, "Hand {}", n)?;
            let outcome = eng.run_observed(&mut sink)?;
            for line in sink.take_lines() {
                writeln!(out, "{}", line)?;
            }
            outcome
        } else {
            eng.run()?
        };
        tally.record(&outcome);
    }

    writeln!(out, "Simulated: {} hands", hands)?;
    for (seat, wins) in tally.wins.iter().enumerate() {
        let pct = f64::from(*wins) * 100.0 / f64::from(hands);
        writeln!(
            out,
            "{} ({}): {} wins ({:.1}%)",
            seat_label(seat),
            names[seat],
            wins,
            pct
        )?;
    }
    writeln!(
        out,
        "Showdowns: {} Walkovers: {} Abandoned: {}",
        tally.showdowns, tally.walkovers, tally.abandoned
    )?;
    writeln!(out, "Biggest pot: {}", tally.biggest_pot)?;
    writeln!(out, "Tables: {}", tally.tables)?;
    Ok(())
}
