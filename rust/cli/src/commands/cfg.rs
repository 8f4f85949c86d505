//! Configuration command handler.
//!
//! Prints the resolved table configuration as JSON, each value paired with
//! the layer it came from:
//!
//! ```json
//! {
//!   "starting_stack": { "value": 100, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "discard_rounds": {
            "value": config.discard_rounds,
            "source": sources.discard_rounds,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
    });

    let text = serde_json::to_string_pretty(&display)
        .map_err(|e| CliError::Config(format!("cannot serialize configuration: {}", e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}
