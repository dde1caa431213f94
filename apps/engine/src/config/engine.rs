use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::rules::DEFAULT_WINNING_SCORE;

pub const WINNING_SCORE_VAR: &str = "TPF_WINNING_SCORE";
pub const ROOM_MAILBOX_VAR: &str = "TPF_ROOM_MAILBOX";
pub const RNG_SEED_VAR: &str = "TPF_RNG_SEED";

pub const DEFAULT_ROOM_MAILBOX: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable '{name}' has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Engine settings shared by every room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Score that ends the game.
    pub winning_score: i16,
    /// Bounded command queue depth per room actor.
    pub room_mailbox: usize,
    /// Fixed base seed for every room; `None` draws one per room.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            winning_score: DEFAULT_WINNING_SCORE,
            room_mailbox: DEFAULT_ROOM_MAILBOX,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let winning_score = parse_var(WINNING_SCORE_VAR)?.unwrap_or(defaults.winning_score);
        if winning_score < 1 {
            return Err(invalid(WINNING_SCORE_VAR, winning_score, "must be at least 1"));
        }
        let room_mailbox = parse_var(ROOM_MAILBOX_VAR)?.unwrap_or(defaults.room_mailbox);
        if room_mailbox < 1 {
            return Err(invalid(ROOM_MAILBOX_VAR, room_mailbox, "must be at least 1"));
        }
        let rng_seed = parse_var(RNG_SEED_VAR)?;

        Ok(Self {
            winning_score,
            room_mailbox,
            rng_seed,
        })
    }

    /// Base seed for a new room: the fixed one if configured, else fresh OS entropy.
    pub fn room_seed(&self) -> u64 {
        self.rng_seed.unwrap_or_else(rand::random)
    }
}

fn invalid(name: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// `Ok(None)` when unset or blank.
fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| invalid(name, &raw, &e.to_string())),
        _ => Ok(None),
    }
}
