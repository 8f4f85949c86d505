//! Layered table configuration.
//!
//! Values resolve as defaults < TOML file named by `DRAWPOKER_CONFIG` <
//! environment variables < command-line flags, and the winning layer is
//! remembered for every value so `cfg` can report it.

use drawpoker_engine::engine::GameSettings;
use drawpoker_engine::player::STARTING_STACK;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

use crate::cli::TableArgs;

pub const CONFIG_ENV: &str = "DRAWPOKER_CONFIG";
pub const SEED_ENV: &str = "DRAWPOKER_SEED";
pub const STACK_ENV: &str = "DRAWPOKER_STACK";
pub const ROUNDS_ENV: &str = "DRAWPOKER_ROUNDS";
pub const PLAYERS_ENV: &str = "DRAWPOKER_PLAYERS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub players: usize,
    pub discard_rounds: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            players: 2,
            discard_rounds: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub players: ValueSource,
    pub discard_rounds: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            players: ValueSource::Default,
            discard_rounds: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl ConfigResolved {
    /// Engine settings for the resolved table.
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            starting_stack: self.config.starting_stack,
            discard_rounds: self.config.discard_rounds,
            seed: self.config.seed,
            ..GameSettings::default()
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub starting_stack: Option<u32>,
    pub players: Option<usize>,
    pub discard_rounds: Option<u32>,
}

impl From<&TableArgs> for Overrides {
    fn from(args: &TableArgs) -> Self {
        Self {
            seed: args.seed,
            starting_stack: args.stack,
            players: args.players.map(usize::from),
            discard_rounds: args.rounds,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl From<ConfigError> for crate::error::CliError {
    fn from(e: ConfigError) -> Self {
        crate::error::CliError::Config(e.to_string())
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_overrides(Overrides::default())
}

pub fn load_with_overrides(flags: Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.discard_rounds {
            cfg.discard_rounds = v;
            sources.discard_rounds = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_value(SEED_ENV, "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value(STACK_ENV, "starting stack")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = env_value(ROUNDS_ENV, "discard rounds")? {
        cfg.discard_rounds = v;
        sources.discard_rounds = ValueSource::Env;
    }
    if let Some(v) = env_value(PLAYERS_ENV, "players")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }

    if let Some(v) = flags.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Flag;
    }
    if let Some(v) = flags.starting_stack {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Flag;
    }
    if let Some(v) = flags.discard_rounds {
        cfg.discard_rounds = v;
        sources.discard_rounds = ValueSource::Flag;
    }
    if let Some(v) = flags.players {
        cfg.players = v;
        sources.players = ValueSource::Flag;
    }

    let resolved = ConfigResolved {
        config: cfg,
        sources,
    };
    resolved
        .settings()
        .validate(resolved.config.players)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    Ok(resolved)
}

fn env_value<T: FromStr>(key: &str, what: &str) -> Result<Option<T>, ConfigError> {
    if let Ok(raw) = std::env::var(key)
        && !raw.is_empty()
    {
        return raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {} in {}: {}", what, key, raw)));
    }
    Ok(None)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    discard_rounds: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}
