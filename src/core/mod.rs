//! Core engine types: identities, randomness, configuration, actions, errors.
//!
//! This module contains the building blocks shared by the ledger, the
//! event pools, and the round engine.

pub mod action;
pub mod config;
pub mod error;
pub mod identity;
pub mod rng;

pub use action::{Action, ActionRecord};
pub use config::RoundConfig;
pub use error::{ConfigError, DrawError, EngineError};
pub use identity::{Identity, Seat};
pub use rng::{GameRng, GameRngState, Pick, Randomizer, SequenceRng};
