//! Driver configuration: defaults, environment, then command-line flags.

use std::env;

use anyhow::{anyhow, Result};

use crate::types::{BOT_MOVE_COOLDOWN_MS, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Two bots, headless
    #[default]
    Versus,
    /// Keyboard player against one bot in the terminal
    Play,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub mode: Mode,
    pub seed: u32,
    pub depth: u8,
    pub cooldown_ms: u32,
    /// Tick budget for headless matches
    pub max_ticks: u64,
    pub tick_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Versus,
            seed: 1,
            depth: 1,
            cooldown_ms: BOT_MOVE_COOLDOWN_MS,
            max_ticks: 100_000,
            tick_ms: TICK_MS,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables; unset or unparsable values keep
    /// their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let seed = env::var("TETRIS_DUEL_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);
        let depth = env::var("TETRIS_DUEL_DEPTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.depth);
        let cooldown_ms = env::var("TETRIS_DUEL_COOLDOWN_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cooldown_ms);
        let max_ticks = env::var("TETRIS_DUEL_MAX_TICKS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_ticks);

        Self {
            seed,
            depth,
            cooldown_ms,
            max_ticks,
            ..defaults
        }
    }

    /// Apply command-line arguments (without the program name) on top of
    /// `self`.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        if let Some(first) = args.first() {
            match first.as_str() {
                "versus" => {
                    self.mode = Mode::Versus;
                    i = 1;
                }
                "play" => {
                    self.mode = Mode::Play;
                    i = 1;
                }
                _ => {}
            }
        }

        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--seed" => self.seed = parse_value(args, &mut i, flag)?,
                "--depth" => self.depth = parse_value(args, &mut i, flag)?,
                "--ticks" => self.max_ticks = parse_value(args, &mut i, flag)?,
                "--cooldown" => self.cooldown_ms = parse_value(args, &mut i, flag)?,
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }

        if self.depth == 0 {
            return Err(anyhow!("--depth must be at least 1"));
        }
        Ok(self)
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T> {
    *i += 1;
    let v = args
        .get(*i)
        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}
