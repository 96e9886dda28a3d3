//! Event content: definitions, authored catalog, and depleting pools.
//!
//! ## Key Types
//!
//! - `Event` / `Mechanic`: Immutable narrative content
//! - `EventCatalog`: Authored event database, keyed by identity
//! - `EventPool`: Per-playthrough copy that non-final draws deplete

pub mod catalog;
pub mod definition;
pub mod pool;

pub use catalog::EventCatalog;
pub use definition::{Event, Mechanic};
pub use pool::EventPool;
