//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "drawpoker",
    version,
    about = "Five-card draw poker on the terminal"
)]
pub struct DrawPokerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table options shared by the commands that build a table.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// RNG seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of seats (2-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
    pub players: Option<u8>,
    /// Starting stack for every seat
    #[arg(long)]
    pub stack: Option<u32>,
    /// Discard rounds after the opening betting round
    #[arg(long)]
    pub rounds: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands at the console, or watch the AI play
    Play {
        #[arg(long, value_enum, default_value_t = Vs::Human)]
        vs: Vs,
        #[arg(long)]
        hands: Option<u32>,
        /// AI opponents, cycled over the seats (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "baseline")]
        ai: Vec<String>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Run automated hands and tally the winners
    Sim {
        #[arg(long)]
        hands: u32,
        #[arg(long, value_delimiter = ',', default_value = "baseline")]
        ai: Vec<String>,
        /// Print every phase change and outcome
        #[arg(long)]
        verbose: bool,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Deal one hand and classify every seat's cards
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: Option<u8>,
    },
    /// Classify cards given as text, e.g. `As Ks Qs Js 10s`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Who sits in seat 1 during `play`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    Human,
    Ai,
}

impl Vs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Human => "human",
            Vs::Ai => "ai",
        }
    }
}
