//! Engine configuration: defaults, JSON and environment sources.

use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::rules::PLAYERS;
use crate::domain::state::Seat;
use crate::errors::domain::DomainError;

pub const DEFAULT_SCORE_THRESHOLD: u32 = 1000;

pub const ENV_SCORE_THRESHOLD: &str = "BELOTE_SCORE_THRESHOLD";
pub const ENV_STARTING_DEALER: &str = "BELOTE_STARTING_DEALER";
pub const ENV_AUTO_SCORE: &str = "BELOTE_AUTO_SCORE";
pub const ENV_RNG_SEED: &str = "BELOTE_RNG_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A game ends once a team's cumulative score reaches this.
    pub score_threshold: u32,
    pub starting_dealer: Seat,
    /// Score the hand and deal the next one in the same commit as the play
    /// that closes trick 8.
    pub auto_score: bool,
    /// Fixed game seed; a fresh one is drawn per game when absent.
    pub rng_seed: Option<i64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            starting_dealer: 0,
            auto_score: true,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by any `BELOTE_*` variables that are set.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut cfg = Self::default();
        if let Some(v) = parsed_var::<u32>(ENV_SCORE_THRESHOLD)? {
            cfg.score_threshold = v;
        }
        if let Some(v) = parsed_var::<Seat>(ENV_STARTING_DEALER)? {
            cfg.starting_dealer = v;
        }
        if let Some(v) = optional_var(ENV_AUTO_SCORE) {
            cfg.auto_score = parse_flag(ENV_AUTO_SCORE, &v)?;
        }
        if let Some(v) = parsed_var::<i64>(ENV_RNG_SEED)? {
            cfg.rng_seed = Some(v);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Missing fields take their defaults.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DomainError> {
        let cfg: Self = serde_json::from_value(value.clone())
            .map_err(|e| DomainError::validation(format!("engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.score_threshold == 0 {
            return Err(DomainError::validation(
                "score_threshold must be greater than zero",
            ));
        }
        if self.starting_dealer as usize >= PLAYERS {
            return Err(DomainError::validation(format!(
                "starting_dealer {} out of range 0..=3",
                self.starting_dealer
            )));
        }
        Ok(())
    }
}

/// Get an environment variable, treating empty as unset.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>, DomainError> {
    optional_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| DomainError::validation(format!("{key}: invalid value '{raw}'")))
        })
        .transpose()
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::validation(format!(
            "{key}: invalid flag '{raw}'"
        ))),
    }
}
