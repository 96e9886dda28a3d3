//! Round flow: phases, view modes, and the engine that drives them.

pub mod engine;
pub mod state;

pub use engine::{ActionOutcome, RoundEngine};
pub use state::{
    Direction, MovementStep, Phase, PrimaryAction, RoundOutcome, RoundState, ViewMode,
};
