//! Depleting event pools for one playthrough.
//!
//! A non-final draw removes the event permanently, so no event repeats
//! within a playthrough. Final events are looked up, never removed.
//! Restoring from the catalog undoes all depletion.

use im::{HashMap as ImHashMap, Vector};
use smallvec::SmallVec;

use super::catalog::EventCatalog;
use super::definition::Event;
use crate::core::{DrawError, Identity, Randomizer};

/// Per-identity events still available to draw.
///
/// ## Usage
///
/// ```
/// use party_rounds::core::{DrawError, Identity, SequenceRng};
/// use party_rounds::events::{Event, EventCatalog, EventPool};
///
/// let catalog = EventCatalog::new()
///     .with_events("rage", vec![Event::new("Outburst", ""), Event::new("End", "").final_event()]);
/// let mut pool = EventPool::from_catalog(&catalog);
/// let mut rng = SequenceRng::constant(0.0);
/// let rage = Identity::new("rage");
///
/// assert_eq!(pool.draw_non_final(&rage, &mut rng).unwrap().title, "Outburst");
/// assert!(matches!(pool.draw_non_final(&rage, &mut rng), Err(DrawError::PoolExhausted { .. })));
///
/// // The final event is still there, and stays there
/// assert_eq!(pool.draw_final(&rage).unwrap().title, "End");
/// assert_eq!(pool.draw_final(&rage).unwrap().title, "End");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPool {
    pools: ImHashMap<Identity, Vector<Event>>,
}

impl EventPool {
    /// Create a fresh, undepleted pool from authored content.
    #[must_use]
    pub fn from_catalog(catalog: &EventCatalog) -> Self {
        Self {
            pools: catalog.snapshot(),
        }
    }

    /// Discard all depletion and start over from `catalog`.
    pub fn restore(&mut self, catalog: &EventCatalog) {
        self.pools = catalog.snapshot();
    }

    /// Draw and remove a uniformly chosen non-final event.
    ///
    /// Consumes one index from `rng` when the pool is non-empty and none
    /// otherwise.
    ///
    /// # Errors
    ///
    /// `PoolExhausted` if no non-final event remains for `identity`, or
    /// if `rng` returns an index outside the candidates. The pool is left
    /// untouched in both cases.
    pub fn draw_non_final<R: Randomizer + ?Sized>(
        &mut self,
        identity: &Identity,
        rng: &mut R,
    ) -> Result<Event, DrawError> {
        let exhausted = || DrawError::PoolExhausted {
            identity: identity.clone(),
        };

        let pool = self.pools.get_mut(identity).ok_or_else(exhausted)?;

        // Indices into the full pool, skipping final events
        let candidates: SmallVec<[usize; 16]> = pool
            .iter()
            .enumerate()
            .filter(|(_, event)| !event.is_final)
            .map(|(index, _)| index)
            .collect();

        let choice = rng
            .uniform_index(candidates.len())
            .and_then(|choice| candidates.get(choice).copied())
            .ok_or_else(exhausted)?;
        Ok(pool.remove(choice))
    }

    /// Look up the final event for an identity without removing it.
    ///
    /// # Errors
    ///
    /// `NoFinalEvent` if none was authored.
    pub fn draw_final(&self, identity: &Identity) -> Result<Event, DrawError> {
        self.pools
            .get(identity)
            .and_then(|pool| pool.iter().find(|event| event.is_final))
            .cloned()
            .ok_or_else(|| DrawError::NoFinalEvent {
                identity: identity.clone(),
            })
    }

    /// Number of non-final events still drawable for an identity.
    #[must_use]
    pub fn remaining(&self, identity: &Identity) -> usize {
        self.pools
            .get(identity)
            .map_or(0, |pool| pool.iter().filter(|e| !e.is_final).count())
    }

    /// Total events (final included) held for an identity.
    #[must_use]
    pub fn len(&self, identity: &Identity) -> usize {
        self.pools.get(identity).map_or(0, Vector::len)
    }

    /// Check if nothing at all is held for an identity.
    #[must_use]
    pub fn is_empty(&self, identity: &Identity) -> bool {
        self.len(identity) == 0
    }
}
