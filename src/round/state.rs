//! Round state and the values the engine reports back.
//!
//! ## Phases
//!
//! ```text
//! Setup -> Active(1) -> Active(2) -> ... -> Active(max) -> Finished
//!   ^                                                        |
//!   +-------------------------- reset -----------------------+
//! ```
//!
//! Committing a round resolves it synchronously; there is no observable
//! in-between state. An active round is either in `Scoring` view or in
//! `Event` view.

use serde::{Deserialize, Serialize};

use crate::core::{DrawError, Identity};
use crate::events::Event;
use crate::scores::Ranking;

/// View mode inside an active round.
///
/// The mode decides what the primary action means: commit the round
/// (scoring) or spend a movement step (event).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    /// Scores are being entered.
    #[default]
    Scoring,
    /// The last resolved event is shown.
    Event,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Scoring => Self::Event,
            Self::Event => Self::Scoring,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Scoring => "scoring",
            Self::Event => "event",
        })
    }
}

/// Externally visible engine phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for identities to be assigned.
    Setup,
    /// A round is being played.
    Active {
        /// Round number (1-indexed).
        round: u32,
        /// Current view mode.
        mode: ViewMode,
    },
    /// All rounds played. Only `reset` leaves this phase.
    Finished,
}

impl Phase {
    /// Check if a round is being played.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => f.write_str("setup"),
            Self::Active { round, mode } => write!(f, "round {round} ({mode})"),
            Self::Finished => f.write_str("finished"),
        }
    }
}

/// What the primary button does right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryAction {
    /// Start a game from the current selection.
    StartGame,
    /// Commit the round.
    CommitRound,
    /// Spend a movement step.
    ResolveMovement,
    /// Leave the finished game.
    ReturnHome,
}

/// Compass direction revealed by a movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Direction for an index in `[0, 4)`, wrapping larger values.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Clockwise rotation from north, in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::North => 0,
            Self::East => 90,
            Self::South => 180,
            Self::West => 270,
        }
    }
}

/// Result of one movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementStep {
    /// Where this step goes.
    pub direction: Direction,
    /// Steps still to resolve after this one.
    pub remaining: u32,
}

/// Result of committing a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// The round that was committed.
    pub round: u32,
    /// Post-commit ranking the winner was chosen from.
    pub ranking: Ranking,
    /// Identity whose event was drawn.
    pub winner: Identity,
    /// Drawn event, or the fallback event.
    pub event: Event,
    /// Set when the draw failed and the fallback event was used.
    pub fallback: Option<DrawError>,
    /// Whether randomness decided the winner (false on the final round).
    pub randomized: bool,
    /// Phase entered after the commit.
    pub next: Phase,
}

impl RoundOutcome {
    /// Check if this was the last round.
    #[must_use]
    pub const fn finished(&self) -> bool {
        matches!(self.next, Phase::Finished)
    }
}

/// Mutable per-session round data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current round (1-indexed).
    pub round: u32,
    /// Current view mode.
    pub mode: ViewMode,
    /// Winner of the last committed round.
    pub last_winner: Option<Identity>,
    /// Event drawn for the last committed round.
    pub last_event: Option<Event>,
    /// Movement steps left to resolve.
    pub movement_remaining: u32,
}

impl RoundState {
    /// State at game start: round 1, nothing resolved yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            round: 1,
            mode: ViewMode::Scoring,
            last_winner: None,
            last_event: None,
            movement_remaining: 0,
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}
