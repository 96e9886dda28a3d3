//! Event definitions - immutable narrative content.
//!
//! An `Event` is what the round winner "triggers": a title, a narrative
//! description, and a `Mechanic` describing the table effect. The only
//! part of the mechanic the engine interprets is the movement count.
//!
//! ## Content format
//!
//! ```json
//! {
//!   "title": "The Mirror",
//!   "description": "Alice sees herself twice.",
//!   "mechanic": { "description": "Move Alice twice.", "movement": 2 },
//!   "isFinal": false
//! }
//! ```
//!
//! `movement` may also be written as `{ "number": 2 }`.

use serde::{Deserialize, Deserializer, Serialize};

/// Table effect attached to an event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mechanic {
    /// Free-form effect text shown to players.
    #[serde(default)]
    pub description: String,

    /// Number of movement steps the event imposes.
    #[serde(default, deserialize_with = "deserialize_movement")]
    pub movement: u32,
}

impl Mechanic {
    /// Create a mechanic with effect text and a movement count.
    pub fn new(description: impl Into<String>, movement: u32) -> Self {
        Self {
            description: description.into(),
            movement,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MovementRepr {
    Count(u32),
    Nested { number: u32 },
}

fn deserialize_movement<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match MovementRepr::deserialize(deserializer)? {
        MovementRepr::Count(n) | MovementRepr::Nested { number: n } => n,
    })
}

/// Immutable event record.
///
/// ## Example
///
/// ```
/// use party_rounds::events::{Event, Mechanic};
///
/// let event = Event::new("Tea Party", "Everyone changes seats.")
///     .with_mechanic(Mechanic::new("Move Alice once.", 1));
///
/// assert_eq!(event.movement(), 1);
/// assert!(!event.is_final);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Short title.
    pub title: String,

    /// Narrative text.
    #[serde(default)]
    pub description: String,

    /// Table effect.
    #[serde(default)]
    pub mechanic: Mechanic,

    /// Reserved for the last round.
    #[serde(default)]
    pub is_final: bool,
}

impl Event {
    /// Create a non-final event with an empty mechanic.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            mechanic: Mechanic::default(),
            is_final: false,
        }
    }

    /// Set the mechanic (builder pattern).
    #[must_use]
    pub fn with_mechanic(mut self, mechanic: Mechanic) -> Self {
        self.mechanic = mechanic;
        self
    }

    /// Mark as the final-round event (builder pattern).
    #[must_use]
    pub fn final_event(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Neutral event used when nothing can be drawn.
    #[must_use]
    pub fn silence() -> Self {
        Self::new("Silence", "No event available.")
    }

    /// Movement steps imposed by this event.
    #[must_use]
    pub fn movement(&self) -> u32 {
        self.mechanic.movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let event = Event::new("Finale", "The end.")
            .with_mechanic(Mechanic::new("", 0))
            .final_event();

        assert!(event.is_final);
        assert_eq!(event.movement(), 0);
        assert_eq!(event.title, "Finale");
    }

    #[test]
    fn test_parse_flat_movement() {
        let json = r#"{
            "title": "Rabbit Hole",
            "description": "Down we go.",
            "mechanic": { "description": "Move Alice 3 times.", "movement": 3 },
            "isFinal": false
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.movement(), 3);
        assert_eq!(event.mechanic.description, "Move Alice 3 times.");
    }

    #[test]
    fn test_parse_nested_movement() {
        let json = r#"{
            "title": "Cheshire Grin",
            "mechanic": { "description": "", "movement": { "number": 2 } }
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.movement(), 2);
        assert!(event.description.is_empty());
        assert!(!event.is_final);
    }

    #[test]
    fn test_parse_missing_mechanic() {
        let json = r#"{ "title": "Last Word", "description": "Quiet.", "isFinal": true }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_final);
        assert_eq!(event.mechanic, Mechanic::default());
    }

    #[test]
    fn test_negative_movement_rejected() {
        let json = r#"{ "title": "Bad", "mechanic": { "movement": -1 } }"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_silence_is_neutral() {
        let silence = Event::silence();
        assert_eq!(silence.title, "Silence");
        assert_eq!(silence.movement(), 0);
        assert!(!silence.is_final);
    }
}
