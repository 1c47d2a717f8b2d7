//! # Reefwright Data
//!
//! Plain data structures shared by the Reefwright engine crates: folding input,
//! organism attributes, missions, global stats and environmental observations.
//!
//! Nothing in this crate holds behaviour beyond small accessors; the rules live in
//! `reefwright_core`.

pub mod data;

pub use data::folding::{FoldingInput, OrganismAttributes};
pub use data::mission::{DifficultyVector, GeoPoint, Mission, MissionStatus};
pub use data::ocean::{AlertLevel, DataSource, EnvironmentalDataPoint};
pub use data::stats::GlobalStats;
