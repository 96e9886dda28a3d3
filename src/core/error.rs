//! Error types.
//!
//! - `EngineError`: rejected actions, surfaced to the caller
//! - `DrawError`: failed content draws, recovered inside the engine
//! - `ConfigError`: invalid `RoundConfig`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::identity::Identity;
use crate::round::Phase;

/// Errors returned for actions the engine refuses to apply.
///
/// A rejected action leaves the engine untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Fewer players than the configured minimum.
    #[error("at least {min} players are required (got {got})")]
    TooFewPlayers { min: usize, got: usize },

    /// More players than seats can be numbered.
    #[error("at most {max} players are supported (got {got})")]
    TooManyPlayers { max: usize, got: usize },

    /// Some player has not chosen an identity.
    #[error("incomplete selection: {chosen} of {required} players chose an identity")]
    IncompleteSelection { chosen: usize, required: usize },

    /// Two or more players chose the same identity.
    #[error("identity {identity} was chosen by more than one player")]
    DuplicateSelection { identity: Identity },

    /// Score adjustment for an identity that is not in play.
    #[error("identity {identity} is not in play")]
    UnknownIdentity { identity: Identity },

    /// Action not allowed in the current phase.
    #[error("{action} is not allowed during {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },
}

/// Errors from drawing an event out of a pool.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawError {
    /// No non-final event remains for the identity.
    #[error("no non-final events left for {identity}")]
    PoolExhausted { identity: Identity },

    /// No final event was authored for the identity.
    #[error("no final event authored for {identity}")]
    NoFinalEvent { identity: Identity },
}

/// Errors raised when configuration invariants are violated.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_rounds must be at least 1 (got {0})")]
    NoRounds(u32),
    #[error("primary_winner_chance must be between 0 and 1 (got {0:.2})")]
    ChanceOutOfRange(f64),
    #[error("min_players must be at least 2 (got {0})")]
    TooFewMinPlayers(usize),
}
