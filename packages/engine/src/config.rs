//! Table configuration handling.
//!
//! Provides a typed view over the options a table is created with. Every field
//! has a default, so `{}` is a valid configuration:
//!
//! ```json
//! {"players": 4, "jokers": 2, "seed": 12345, "first_player": 0,
//!  "direction": "UP", "refill_hand": false}
//! ```
//!
//! Values can also come from the environment (`SHITHEAD_PLAYERS`,
//! `SHITHEAD_JOKERS`, `SHITHEAD_SEED`), layered over the defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::rules::{cards_needed, TableRules, MIN_PLAYERS};
use crate::domain::turn_order::Direction;
use crate::domain::PlayerId;
use crate::errors::SetupError;

pub const ENV_PLAYERS: &str = "SHITHEAD_PLAYERS";
pub const ENV_JOKERS: &str = "SHITHEAD_JOKERS";
pub const ENV_SEED: &str = "SHITHEAD_SEED";

/// Cards in a standard deck before Jokers are added.
const STANDARD_CARDS: usize = 52;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: usize,
    pub jokers: usize,
    /// Deck shuffle seed. When absent a random seed is drawn per table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub first_player: PlayerId,
    pub direction: Direction,
    pub refill_hand: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 4,
            jokers: 2,
            seed: None,
            first_player: 0,
            direction: Direction::Up,
            refill_hand: false,
        }
    }
}

impl GameConfig {
    /// Create a config from an optional JSON value. `None` yields the defaults.
    pub fn from_json(config: Option<&JsonValue>) -> Result<Self, SetupError> {
        let parsed = match config {
            Some(json) => serde_json::from_value(json.clone())
                .map_err(|e| SetupError::InvalidConfig(e.to_string()))?,
            None => Self::default(),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SetupError> {
        let json: JsonValue =
            serde_json::from_str(raw).map_err(|e| SetupError::InvalidConfig(e.to_string()))?;
        Self::from_json(Some(&json))
    }

    /// Defaults overridden by `SHITHEAD_*` environment variables.
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SetupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_PLAYERS) {
            config.players = parse_var(ENV_PLAYERS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_JOKERS) {
            config.jokers = parse_var(ENV_JOKERS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse_var(ENV_SEED, &raw)?);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rules(&self) -> TableRules {
        TableRules {
            refill_hand: self.refill_hand,
        }
    }

    /// Deck size this config produces.
    pub fn deck_size(&self) -> usize {
        STANDARD_CARDS + self.jokers
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.players < MIN_PLAYERS {
            return Err(SetupError::InvalidPlayerCount {
                min: MIN_PLAYERS,
                got: self.players,
            });
        }
        if self.first_player >= self.players {
            return Err(SetupError::InvalidFirstPlayer {
                first: self.first_player,
                players: self.players,
            });
        }
        let needed = cards_needed(self.players);
        if self.deck_size() < needed {
            return Err(SetupError::InsufficientCards {
                needed,
                available: self.deck_size(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, SetupError> {
    raw.trim()
        .parse()
        .map_err(|_| SetupError::InvalidConfig(format!("{key}={raw:?} is not a valid number")))
}
