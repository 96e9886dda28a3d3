//! Score tracking.
//!
//! `ScoreLedger` owns cumulative and provisional scores per identity and
//! produces the ranking the round engine resolves winners from.

pub mod ledger;

pub use ledger::{Ranking, ScoreLedger, ScoreLine, Standing};
