//! Round engine configuration.
//!
//! Games configure the engine at startup with a `RoundConfig`:
//! - How many rounds a game lasts
//! - How often the leader (rather than the runner-up) wins a round
//! - The minimum number of players
//! - The neutral event used when a draw has nothing to give
//!
//! Every field has a default, so partial JSON is accepted.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::events::Event;

/// Complete round engine configuration.
///
/// ## Example
///
/// ```
/// use party_rounds::core::RoundConfig;
///
/// let config = RoundConfig::default().with_max_rounds(3);
/// assert_eq!(config.max_rounds, 3);
/// assert_eq!(config.primary_winner_chance, 0.75);
/// assert!(config.validate().is_ok());
///
/// let parsed = RoundConfig::from_json(r#"{ "max_rounds": 7 }"#).unwrap();
/// assert_eq!(parsed.max_rounds, 7);
/// assert_eq!(parsed.min_players, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Number of rounds; the last one is the final round.
    #[serde(default = "RoundConfig::default_max_rounds")]
    pub max_rounds: u32,

    /// Probability that the leader wins a non-final round.
    #[serde(default = "RoundConfig::default_primary_winner_chance")]
    pub primary_winner_chance: f64,

    /// Fewest players a game can start with.
    #[serde(default = "RoundConfig::default_min_players")]
    pub min_players: usize,

    /// Substituted when a draw fails.
    #[serde(default = "Event::silence")]
    pub fallback_event: Event,
}

impl RoundConfig {
    const fn default_max_rounds() -> u32 {
        5
    }

    const fn default_primary_winner_chance() -> f64 {
        0.75
    }

    const fn default_min_players() -> usize {
        2
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed. Values are not
    /// validated here; see [`validate`](RoundConfig::validate).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the leader's chance to win a non-final round.
    #[must_use]
    pub fn with_primary_winner_chance(mut self, chance: f64) -> Self {
        self.primary_winner_chance = chance;
        self
    }

    /// Set the minimum player count.
    #[must_use]
    pub fn with_min_players(mut self, players: usize) -> Self {
        self.min_players = players;
        self
    }

    /// Set the fallback event.
    #[must_use]
    pub fn with_fallback_event(mut self, event: Event) -> Self {
        self.fallback_event = event;
        self
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds(self.max_rounds));
        }
        if !(0.0..=1.0).contains(&self.primary_winner_chance) {
            return Err(ConfigError::ChanceOutOfRange(self.primary_winner_chance));
        }
        if self.min_players < 2 {
            return Err(ConfigError::TooFewMinPlayers(self.min_players));
        }
        Ok(())
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            max_rounds: Self::default_max_rounds(),
            primary_winner_chance: Self::default_primary_winner_chance(),
            min_players: Self::default_min_players(),
            fallback_event: Event::silence(),
        }
    }
}
