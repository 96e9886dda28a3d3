//! Game content built on the round engine.

pub mod emotions;
