//! Score ledger: cumulative and provisional scores per identity.
//!
//! ## Round lifecycle
//!
//! 1. `reset_provisional()` at the start of every round
//! 2. `adjust_provisional()` as players score (may go negative)
//! 3. `commit()` exactly once, folding provisional into cumulative
//! 4. `ranking()` on the committed totals
//!
//! `commit()` is not idempotent: a second call applies the same
//! provisional scores again. The round engine guarantees one call per round.

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineError, Identity, Seat};

/// Identities ordered from first to last place.
pub type Ranking = SmallVec<[Identity; 4]>;

/// Scores held for one identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    /// Total carried across rounds.
    pub cumulative: i64,
    /// Change accrued during the current round.
    pub provisional: i64,
}

impl ScoreLine {
    /// Total shown to players mid-round.
    #[must_use]
    pub const fn displayed(&self) -> i64 {
        self.cumulative.saturating_add(self.provisional)
    }
}

/// One row of the final standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based place, in ranking order.
    pub place: usize,
    /// Identity holding the place.
    pub identity: Identity,
    /// Cumulative score.
    pub score: i64,
}

/// Per-identity score storage in seat order.
///
/// ## Example
///
/// ```
/// use party_rounds::core::Identity;
/// use party_rounds::scores::ScoreLedger;
///
/// let a = Identity::new("a");
/// let b = Identity::new("b");
///
/// let mut ledger = ScoreLedger::new();
/// ledger.initialize(&[a.clone(), b.clone()]).unwrap();
///
/// ledger.adjust_provisional(&b, 2).unwrap();
/// ledger.commit();
///
/// assert_eq!(ledger.ranking().as_slice(), &[b.clone(), a.clone()]);
/// assert_eq!(ledger.cumulative(&b), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    /// Identities in seat (assignment) order.
    seats: Vec<Identity>,
    /// Scores, indexed like `seats`.
    lines: Vec<ScoreLine>,
    index: FxHashMap<Identity, Seat>,
}

impl ScoreLedger {
    /// Create an empty ledger with no identities in play.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `players` in the given seat order, all at zero.
    ///
    /// Replaces anything tracked before. On error the ledger is unchanged.
    ///
    /// # Errors
    ///
    /// `TooFewPlayers` when `players` is empty, `TooManyPlayers` past 255,
    /// and `DuplicateSelection` when an identity appears twice.
    pub fn initialize(&mut self, players: &[Identity]) -> Result<(), EngineError> {
        if players.is_empty() {
            return Err(EngineError::TooFewPlayers { min: 1, got: 0 });
        }
        if players.len() > usize::from(u8::MAX) {
            return Err(EngineError::TooManyPlayers {
                max: usize::from(u8::MAX),
                got: players.len(),
            });
        }

        let mut index = FxHashMap::default();
        for (seat, identity) in (0..=u8::MAX).map(Seat::new).zip(players) {
            if index.insert(identity.clone(), seat).is_some() {
                return Err(EngineError::DuplicateSelection {
                    identity: identity.clone(),
                });
            }
        }

        self.seats = players.to_vec();
        self.lines = vec![ScoreLine::default(); players.len()];
        self.index = index;
        Ok(())
    }

    /// Drop every identity, returning to the empty state.
    pub fn clear(&mut self) {
        self.seats.clear();
        self.lines.clear();
        self.index.clear();
    }

    /// Set every provisional score to zero.
    pub fn reset_provisional(&mut self) {
        for line in &mut self.lines {
            line.provisional = 0;
        }
    }

    /// Add `delta` to an identity's provisional score.
    ///
    /// No floor or ceiling: provisional scores may go negative.
    /// Returns the new provisional value.
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if the identity is not in play.
    pub fn adjust_provisional(&mut self, identity: &Identity, delta: i64) -> Result<i64, EngineError> {
        let seat = self.seat_of(identity).ok_or_else(|| EngineError::UnknownIdentity {
            identity: identity.clone(),
        })?;
        let line = &mut self.lines[seat.index()];
        line.provisional = line.provisional.saturating_add(delta);
        Ok(line.provisional)
    }

    /// Fold every provisional score into its cumulative total.
    ///
    /// Provisional values are left in place until the next
    /// `reset_provisional()`; calling `commit()` twice double-applies them.
    pub fn commit(&mut self) {
        for line in &mut self.lines {
            line.cumulative = line.cumulative.saturating_add(line.provisional);
        }
    }

    /// Identities by cumulative score, highest first.
    ///
    /// Ties keep seat order: the identity assigned earlier ranks higher.
    #[must_use]
    pub fn ranking(&self) -> Ranking {
        let mut order: SmallVec<[usize; 4]> = (0..self.seats.len()).collect();
        // Stable sort keeps seat order among equal scores
        order.sort_by_key(|&i| Reverse(self.lines[i].cumulative));
        order.into_iter().map(|i| self.seats[i].clone()).collect()
    }

    /// Ranking with places and scores, for the end-of-game screen.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.ranking()
            .into_iter()
            .enumerate()
            .map(|(i, identity)| {
                let score = self.cumulative(&identity).unwrap_or_default();
                Standing {
                    place: i + 1,
                    identity,
                    score,
                }
            })
            .collect()
    }

    /// Both scores for an identity.
    #[must_use]
    pub fn line(&self, identity: &Identity) -> Option<ScoreLine> {
        self.seat_of(identity).map(|seat| self.lines[seat.index()])
    }

    /// Cumulative score for an identity.
    #[must_use]
    pub fn cumulative(&self, identity: &Identity) -> Option<i64> {
        self.line(identity).map(|line| line.cumulative)
    }

    /// Provisional score for an identity.
    #[must_use]
    pub fn provisional(&self, identity: &Identity) -> Option<i64> {
        self.line(identity).map(|line| line.provisional)
    }

    /// Seat an identity was assigned to.
    #[must_use]
    pub fn seat_of(&self, identity: &Identity) -> Option<Seat> {
        self.index.get(identity).copied()
    }

    /// Identity sitting at `seat`.
    #[must_use]
    pub fn identity_at(&self, seat: Seat) -> Option<&Identity> {
        self.seats.get(seat.index())
    }

    /// Identities in seat order.
    #[must_use]
    pub fn identities(&self) -> &[Identity] {
        &self.seats
    }

    /// Iterate over (identity, scores) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identity, ScoreLine)> {
        self.seats.iter().zip(self.lines.iter().copied())
    }

    /// Number of identities in play.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check if no identity is in play.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tags: &[&str]) -> Vec<Identity> {
        tags.iter().map(|t| Identity::new(*t)).collect()
    }

    fn ledger(tags: &[&str]) -> ScoreLedger {
        let mut ledger = ScoreLedger::new();
        ledger.initialize(&ids(tags)).unwrap();
        ledger
    }

    #[test]
    fn test_initialize_zeroes_everything() {
        let ledger = ledger(&["rage", "extase", "angoisse"]);

        assert_eq!(ledger.len(), 3);
        for (_, line) in ledger.iter() {
            assert_eq!(line, ScoreLine::default());
        }
        assert_eq!(ledger.seat_of(&Identity::new("angoisse")), Some(Seat::new(2)));
        assert_eq!(ledger.identity_at(Seat::new(1)), Some(&Identity::new("extase")));
    }

    #[test]
    fn test_initialize_rejects_empty() {
        let mut ledger = ScoreLedger::new();
        assert_eq!(
            ledger.initialize(&[]),
            Err(EngineError::TooFewPlayers { min: 1, got: 0 })
        );
    }

    #[test]
    fn test_initialize_rejects_duplicates_and_keeps_state() {
        let mut ledger = ledger(&["a", "b"]);
        ledger.adjust_provisional(&Identity::new("a"), 4).unwrap();

        let err = ledger.initialize(&ids(&["c", "d", "c"])).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateSelection {
                identity: Identity::new("c")
            }
        );

        // Untouched
        assert_eq!(ledger.identities(), ids(&["a", "b"]).as_slice());
        assert_eq!(ledger.provisional(&Identity::new("a")), Some(4));
    }

    #[test]
    fn test_provisional_can_go_negative() {
        let mut ledger = ledger(&["a", "b"]);
        let a = Identity::new("a");

        ledger.adjust_provisional(&a, -1).unwrap();
        let value = ledger.adjust_provisional(&a, -1).unwrap();
        assert_eq!(value, -2);

        ledger.commit();
        assert_eq!(ledger.cumulative(&a), Some(-2));
        assert_eq!(ledger.line(&a).unwrap().displayed(), -4);
    }

    #[test]
    fn test_adjust_unknown_identity() {
        let mut ledger = ledger(&["a", "b"]);
        let ghost = Identity::new("ghost");

        assert_eq!(
            ledger.adjust_provisional(&ghost, 1),
            Err(EngineError::UnknownIdentity { identity: ghost })
        );
    }

    #[test]
    fn test_commit_twice_double_applies() {
        let mut ledger = ledger(&["a", "b"]);
        let a = Identity::new("a");

        ledger.adjust_provisional(&a, 3).unwrap();
        ledger.commit();
        ledger.commit();
        assert_eq!(ledger.cumulative(&a), Some(6));

        ledger.reset_provisional();
        ledger.commit();
        assert_eq!(ledger.cumulative(&a), Some(6));
    }

    #[test]
    fn test_ranking_descending() {
        let mut ledger = ledger(&["a", "b", "c"]);
        ledger.adjust_provisional(&Identity::new("c"), 5).unwrap();
        ledger.adjust_provisional(&Identity::new("a"), 1).unwrap();
        ledger.adjust_provisional(&Identity::new("b"), 3).unwrap();
        ledger.commit();

        assert_eq!(ledger.ranking().to_vec(), ids(&["c", "b", "a"]));
    }

    #[test]
    fn test_ranking_ties_follow_seat_order() {
        // Seat order deliberately not lexical
        let mut ledger = ledger(&["zeta", "alpha", "mid"]);
        ledger.adjust_provisional(&Identity::new("mid"), 2).unwrap();
        ledger.commit();

        assert_eq!(ledger.ranking().to_vec(), ids(&["mid", "zeta", "alpha"]));
    }

    #[test]
    fn test_ranking_uses_cumulative_only() {
        let mut ledger = ledger(&["a", "b"]);
        ledger.adjust_provisional(&Identity::new("b"), 10).unwrap();

        // Not committed yet
        assert_eq!(ledger.ranking().to_vec(), ids(&["a", "b"]));
    }

    #[test]
    fn test_standings() {
        let mut ledger = ledger(&["a", "b"]);
        ledger.adjust_provisional(&Identity::new("b"), 2).unwrap();
        ledger.commit();

        let standings = ledger.standings();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].place, 1);
        assert_eq!(standings[0].identity, Identity::new("b"));
        assert_eq!(standings[0].score, 2);
        assert_eq!(standings[1].place, 2);
        assert_eq!(standings[1].score, 0);
    }

    #[test]
    fn test_clear() {
        let mut ledger = ledger(&["a", "b"]);
        ledger.clear();

        assert!(ledger.is_empty());
        assert!(ledger.ranking().is_empty());
        assert_eq!(ledger.line(&Identity::new("a")), None);
    }
}
