//! Command handler modules.
//!
//! Each subcommand lives in its own file and exposes one
//! `handle_COMMAND_command(...) -> Result<(), CliError>` taking its output
//! streams as `&mut dyn Write`.

mod cfg;
mod deal;
mod eval;
mod play;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::error::CliError;
use drawpoker_ai::{create_ai, AI_NAMES};
use drawpoker_engine::controller::Controller;

/// Build the AI for `seat`, cycling through `names`.
fn ai_for_seat(names: &[String], seat: usize) -> Result<Box<dyn Controller>, CliError> {
    if names.is_empty() {
        return Err(CliError::InvalidInput("at least one AI is required".into()));
    }
    let name = names[seat % names.len()].trim();
    create_ai(name).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "unknown AI '{}' (available: {})",
            name,
            AI_NAMES.join(", ")
        ))
    })
}
