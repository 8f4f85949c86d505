//! # Draw Poker CLI Library
//!
//! Command-line front end for the draw poker round engine: play at the
//! console, simulate AI tables, deal and classify hands, and inspect the
//! resolved configuration.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to the subcommand and returns
//! the process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["drawpoker", "eval", "As", "Ks", "Qs", "Js", "10s"];
//! let code = drawpoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play hands against AI seats, or watch an AI table
//! - `sim`: Run automated hands and tally the winners
//! - `deal`: Deal one hand and classify every seat
//! - `eval`: Classify cards given as text
//! - `cfg`: Display configuration settings and their sources

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, DrawPokerCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command,
};
use config::Overrides;

pub use cli::Vs;
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "eval", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns `0` on success, `2` on errors and `130` when interactive input is
/// cut off mid-hand. Help and version text go to `out` with code `0`.
///
/// `play` reads its decisions from the process stdin.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DrawPokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Draw Poker CLI");
                    write_or_exit!(err, "Usage: drawpoker <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: drawpoker --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play {
            vs,
            hands,
            ai,
            table,
        } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                vs,
                hands,
                &ai,
                Overrides::from(&table),
                out,
                err,
                &mut stdin_lock,
            )
        }
        Commands::Sim {
            hands,
            ai,
            verbose,
            table,
        } => handle_sim_command(hands, &ai, verbose, Overrides::from(&table), out),
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut argv = vec!["drawpoker"];
        argv.extend_from_slice(args);
        let code = run(argv, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, err) = run_capture(&["--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, _, err) = run_capture(&["replay"]);
        assert_eq!(code, 2);
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}", c)));
        }
    }

    #[test]
    fn test_command_errors_are_reported() {
        let (code, _, err) = run_capture(&["eval", "As", "As"]);
        assert_eq!(code, 2);
        assert!(err.contains("Error: Invalid input: duplicate card"));
    }
}
