//! Reefwright application layer: configuration loading, provider wiring and the
//! headless campaign runner. The rules engine lives in `reefwright_core`.

pub mod app;
