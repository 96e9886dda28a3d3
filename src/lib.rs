//! # party-rounds
//!
//! Round and event resolution engine for turn-based party games.
//!
//! Players each take an identity, score one another over a fixed number
//! of rounds, and after every round a winner is drawn from the standings
//! whose event changes the board. The engine owns all of that state; a
//! presentation layer only sends actions and renders queries.
//!
//! ## Design Principles
//!
//! 1. **Injected randomness**: every random decision goes through the
//!    `Randomizer` trait, so any game can be replayed from a seed or a
//!    scripted sequence.
//!
//! 2. **Content is data**: identities and their events come from an
//!    `EventCatalog`, loaded from JSON or built in code. Nothing about a
//!    particular game is hardcoded in the engine.
//!
//! 3. **Rejected actions change nothing**: an action either applies in
//!    full or returns an error and leaves the engine as it was.
//!
//! ## Modules
//!
//! - `core`: Identities, seats, randomness, configuration, actions, errors
//! - `scores`: Provisional and committed score ledger, ranking
//! - `events`: Event definitions, authored catalog, depleting pools
//! - `round`: Phases, view modes, and the `RoundEngine` state machine
//! - `games`: Bundled content (the emotions game)

pub mod core;
pub mod events;
pub mod games;
pub mod round;
pub mod scores;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, DrawError, EngineError, GameRng, GameRngState, Identity,
    Pick, Randomizer, RoundConfig, Seat, SequenceRng,
};

pub use crate::events::{Event, EventCatalog, EventPool, Mechanic};

pub use crate::scores::{Ranking, ScoreLedger, ScoreLine, Standing};

pub use crate::round::{
    ActionOutcome, Direction, MovementStep, Phase, PrimaryAction, RoundEngine, RoundOutcome,
    RoundState, ViewMode,
};
