//! Core data structures for the Reefwright engine.

pub mod folding;
pub mod mission;
pub mod ocean;
pub mod stats;
