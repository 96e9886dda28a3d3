//! Player identities.
//!
//! ## Identity
//!
//! Every player is permanently assigned one category tag for a session.
//! The engine treats identities as opaque labels: content is keyed by them
//! and scores are tracked per identity. Any number of identities (two or
//! more) is supported.
//!
//! ## Seat order
//!
//! The order in which identities were assigned at setup is the seat order.
//! It breaks ranking ties and decides who starts each round.

use serde::{Deserialize, Serialize};

/// Category tag a player is assigned for a whole session.
///
/// ```
/// use party_rounds::core::Identity;
///
/// let rage = Identity::new("rage");
/// assert_eq!(rage.as_str(), "rage");
/// assert_eq!(format!("{}", rage), "rage");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create a new identity from its tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Identity {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat index in assignment order (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seat that opens `round` (1-indexed) in a game of `player_count` players.
    ///
    /// Rotates through the seats in assignment order.
    ///
    /// ```
    /// use party_rounds::core::Seat;
    ///
    /// assert_eq!(Seat::opening(1, 3), Seat::new(0));
    /// assert_eq!(Seat::opening(3, 3), Seat::new(2));
    /// assert_eq!(Seat::opening(4, 3), Seat::new(0));
    /// ```
    #[must_use]
    pub fn opening(round: u32, player_count: usize) -> Self {
        let count = player_count.max(1) as u32;
        Self((round.saturating_sub(1) % count) as u8)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_basics() {
        let a = Identity::new("angoisse");
        let b: Identity = "angoisse".into();

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "angoisse");
        assert_eq!(a.to_string(), "angoisse");
    }

    #[test]
    fn test_identity_serializes_as_plain_string() {
        let id = Identity::new("extase");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"extase\"");

        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_seat_opening_rotates() {
        let seats: Vec<_> = (1..=5).map(|round| Seat::opening(round, 2)).collect();
        assert_eq!(
            seats,
            vec![Seat(0), Seat(1), Seat(0), Seat(1), Seat(0)]
        );
    }

    #[test]
    fn test_seat_display() {
        assert_eq!(format!("{}", Seat::new(0)), "Seat 1");
        assert_eq!(Seat::new(3).index(), 3);
    }
}
