//! "Emotions" party game: the reference content set for the engine.
//!
//! Players pick one of four emotions (rage, extase, melancolie, angoisse),
//! score each other's challenges for five rounds, and after every round
//! the winning emotion triggers one of its events. The last round always
//! ends on the leader's finale.

mod content;

pub use content::{catalog, identities, ANGOISSE, EMOTIONS, EXTASE, MELANCOLIE, RAGE};

use thiserror::Error;

use crate::core::{ConfigError, GameRng, Randomizer, RoundConfig};
use crate::events::EventCatalog;
use crate::round::RoundEngine;

/// Errors from [`EmotionsGameBuilder`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid event content: {0}")]
    Content(#[from] serde_json::Error),
}

/// Builder for a seeded emotions engine.
///
/// ```
/// use party_rounds::games::emotions::{EmotionsGameBuilder, RAGE, EXTASE};
/// use party_rounds::core::Action;
///
/// let mut engine = EmotionsGameBuilder::new().seed(7).build().unwrap();
/// engine.apply(Action::start_game([RAGE, EXTASE])).unwrap();
/// assert_eq!(engine.round(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct EmotionsGameBuilder {
    seed: u64,
    config: RoundConfig,
    catalog: Option<EventCatalog>,
}

impl Default for EmotionsGameBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            config: RoundConfig::default(),
            catalog: None,
        }
    }
}

impl EmotionsGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn config(mut self, config: RoundConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_rounds(mut self, rounds: u32) -> Self {
        self.config = self.config.with_max_rounds(rounds);
        self
    }

    /// Replace the built-in events.
    #[must_use]
    pub fn catalog(mut self, catalog: EventCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replace the built-in events with JSON content.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not valid event content.
    pub fn catalog_json(self, json: &str) -> Result<Self, BuildError> {
        Ok(self.catalog(EventCatalog::from_json(json)?))
    }

    /// Build the engine, in setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<RoundEngine<GameRng>, BuildError> {
        let catalog = self.catalog.unwrap_or_else(content::catalog);
        Ok(RoundEngine::seeded(self.config, catalog, self.seed)?)
    }

    /// Build the engine around another randomness source. The seed is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build_with<R: Randomizer>(self, rng: R) -> Result<RoundEngine<R>, BuildError> {
        let catalog = self.catalog.unwrap_or_else(content::catalog);
        Ok(RoundEngine::new(self.config, catalog, rng)?)
    }
}
