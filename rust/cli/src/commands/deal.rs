//! Deal command handler.
//!
//! Deals one hand to every seat and shows each hand with its category.
//! Supports seeding for deterministic dealing.

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::{format_hand, seat_label};
use drawpoker_engine::controller::{Controller, Scripted};
use drawpoker_engine::engine::Engine;
use drawpoker_engine::hand::classify;
use std::io::Write;

pub fn handle_deal_command(
    seed: Option<u64>,
    players: Option<u8>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_overrides(Overrides {
        seed,
        players: players.map(usize::from),
        ..Overrides::default()
    })?;
    let seats: Vec<Box<dyn Controller>> = (0..resolved.config.players)
        .map(|_| Box::new(Scripted::new()) as Box<dyn Controller>)
        .collect();
    let mut eng = Engine::new(resolved.settings(), seats)?;
    // the deal itself never consults a controller
    eng.step()?;

    writeln!(out, "deal: seed={} players={}", eng.seed(), eng.players().len())?;
    for p in eng.players() {
        writeln!(
            out,
            "{}: {} {}",
            seat_label(p.index()),
            format_hand(p.hand.cards()),
            classify(p.hand.cards())
        )?;
    }
    writeln!(out, "Deck: {} cards left", eng.deck().len())?;
    Ok(())
}
