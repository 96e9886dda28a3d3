//! Action inputs accepted by the round engine.
//!
//! The presentation layer turns button presses into `Action`s and hands
//! them to `RoundEngine::apply`. Every applied action is kept as an
//! `ActionRecord` for replay and debugging.

use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// An input to the round engine.
///
/// ## Example
///
/// ```
/// use party_rounds::core::{Action, Identity};
///
/// let start = Action::start_game(["rage", "extase"]);
/// assert_eq!(start.name(), "start-game");
///
/// let plus = Action::adjust("rage", 1);
/// assert_eq!(plus, Action::AdjustScore { identity: Identity::new("rage"), delta: 1 });
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Begin a game. One entry per player slot; `None` means the slot
    /// has not chosen an identity yet.
    StartGame { assignments: Vec<Option<Identity>> },

    /// Change an identity's provisional score for this round.
    AdjustScore { identity: Identity, delta: i64 },

    /// Commit scores, resolve the winner, and draw the round's event.
    CommitRound,

    /// Switch between the scoring view and the event view.
    ToggleMode,

    /// Spend one movement step.
    ResolveMovementStep,

    /// Return to setup, discarding the session.
    Reset,
}

impl Action {
    /// `StartGame` where every slot has chosen.
    pub fn start_game<I>(identities: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<Identity>,
    {
        Self::StartGame {
            assignments: identities.into_iter().map(|i| Some(i.into())).collect(),
        }
    }

    /// `AdjustScore` shorthand.
    pub fn adjust(identity: impl Into<Identity>, delta: i64) -> Self {
        Self::AdjustScore {
            identity: identity.into(),
            delta,
        }
    }

    /// Stable kebab-case name, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartGame { .. } => "start-game",
            Self::AdjustScore { .. } => "adjust-score",
            Self::CommitRound => "commit-round",
            Self::ToggleMode => "toggle-mode",
            Self::ResolveMovementStep => "resolve-movement-step",
            Self::Reset => "reset",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdjustScore { identity, delta } => write!(f, "adjust-score({identity}, {delta:+})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A recorded action with its position in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action applied.
    pub action: Action,

    /// Round number when the action was applied (0 during setup).
    pub round: u32,

    /// Sequence number within the session.
    pub sequence: usize,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: Action, round: u32, sequence: usize) -> Self {
        Self {
            action,
            round,
            sequence,
        }
    }
}
