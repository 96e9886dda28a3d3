//! Authored event content.
//!
//! The `EventCatalog` is the pristine event database for a session: an
//! ordered list of events per identity. It is loaded once and never
//! depleted. Each playthrough draws from an `EventPool` built from it.
//!
//! Storage uses `im` persistent structures, so handing a fresh copy to a
//! new playthrough is O(1) and the copies never affect each other.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use super::definition::Event;
use crate::core::Identity;

/// Event database keyed by identity.
///
/// ## Example
///
/// ```
/// use party_rounds::core::Identity;
/// use party_rounds::events::{Event, EventCatalog};
///
/// let catalog = EventCatalog::from_json(r#"{
///     "rage": [
///         { "title": "Outburst", "mechanic": { "description": "", "movement": 1 } },
///         { "title": "Reckoning", "isFinal": true }
///     ]
/// }"#).unwrap();
///
/// let rage = Identity::new("rage");
/// assert_eq!(catalog.events(&rage).len(), 2);
/// assert_eq!(catalog.non_final_count(&rage), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCatalog {
    events: ImHashMap<Identity, Vector<Event>>,
}

impl EventCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON (an object of identity -> event array).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into event content.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add events for an identity, after any already registered.
    pub fn register(&mut self, identity: Identity, events: impl IntoIterator<Item = Event>) {
        self.events.entry(identity).or_default().extend(events);
    }

    /// Add events for an identity (builder pattern).
    #[must_use]
    pub fn with_events(
        mut self,
        identity: impl Into<Identity>,
        events: impl IntoIterator<Item = Event>,
    ) -> Self {
        self.register(identity.into(), events);
        self
    }

    /// Authored events for an identity, in order. Empty if none.
    #[must_use]
    pub fn events(&self, identity: &Identity) -> Vector<Event> {
        self.events.get(identity).cloned().unwrap_or_default()
    }

    /// Number of non-final events authored for an identity.
    #[must_use]
    pub fn non_final_count(&self, identity: &Identity) -> usize {
        self.events
            .get(identity)
            .map_or(0, |events| events.iter().filter(|e| !e.is_final).count())
    }

    /// Check if an identity has any authored content.
    #[must_use]
    pub fn contains(&self, identity: &Identity) -> bool {
        self.events.contains_key(identity)
    }

    /// Iterate over identities with content (unordered).
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.events.keys()
    }

    /// Number of identities with content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn snapshot(&self) -> ImHashMap<Identity, Vector<Event>> {
        self.events.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Mechanic;

    #[test]
    fn test_register_and_lookup() {
        let catalog = EventCatalog::new()
            .with_events("rage", vec![Event::new("A", ""), Event::new("B", "")])
            .with_events("rage", vec![Event::new("End", "").final_event()]);

        let rage = Identity::new("rage");
        let titles: Vec<_> = catalog.events(&rage).iter().map(|e| e.title.clone()).collect();

        assert_eq!(titles, vec!["A", "B", "End"]);
        assert_eq!(catalog.non_final_count(&rage), 2);
        assert!(catalog.contains(&rage));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unknown_identity_is_empty() {
        let catalog = EventCatalog::new();
        let ghost = Identity::new("ghost");

        assert!(catalog.is_empty());
        assert!(catalog.events(&ghost).is_empty());
        assert_eq!(catalog.non_final_count(&ghost), 0);
    }

    #[test]
    fn test_from_json_multiple_identities() {
        let json = r#"{
            "extase": [
                { "title": "Waltz", "description": "Spin.", "mechanic": { "description": "Move twice.", "movement": { "number": 2 } } }
            ],
            "angoisse": [
                { "title": "Dread", "isFinal": true }
            ]
        }"#;

        let catalog = EventCatalog::from_json(json).unwrap();
        let extase = catalog.events(&Identity::new("extase"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(extase[0].mechanic, Mechanic::new("Move twice.", 2));
        assert_eq!(catalog.non_final_count(&Identity::new("angoisse")), 0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(EventCatalog::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let catalog = EventCatalog::new().with_events(
            "melancolie",
            vec![Event::new("Rain", ""), Event::new("Fog", ""), Event::new("Ash", "")],
        );

        let json = serde_json::to_string(&catalog).unwrap();
        let back = EventCatalog::from_json(&json).unwrap();

        assert_eq!(back, catalog);
    }
}
