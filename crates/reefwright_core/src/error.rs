//! Error types for session operations.
//!
//! None of these are fatal: every rejection leaves the session untouched, and the
//! presentation layer is free to ignore them.

use crate::session::Phase;
use thiserror::Error;

/// Reasons a session request was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The requested action is not allowed from the current phase.
    #[error("Cannot {action} while in {phase:?}")]
    InvalidTransition { phase: Phase, action: &'static str },

    /// No mission with that id exists in the catalog.
    #[error("Mission not found: {0}")]
    MissionNotFound(String),

    /// The mission exists but is locked or already resolved.
    #[error("Mission {0} is not available")]
    MissionUnavailable(String),

    /// Deploying would cost more Science Points than the player holds.
    #[error("Deployment costs {cost} Science Points but only {balance} are available")]
    Unaffordable { cost: i64, balance: i64 },

    /// The loadout has no slot with that index.
    #[error("Slot {slot} is out of range (loadout has {slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },

    /// An operation needed a selected mission and there is none.
    #[error("No mission selected")]
    NoSelectedMission,
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    #[must_use]
    pub fn invalid_transition(phase: Phase, action: &'static str) -> Self {
        Self::InvalidTransition { phase, action }
    }

    #[must_use]
    pub fn not_found<S: Into<String>>(mission_id: S) -> Self {
        Self::MissionNotFound(mission_id.into())
    }

    #[must_use]
    pub fn unavailable<S: Into<String>>(mission_id: S) -> Self {
        Self::MissionUnavailable(mission_id.into())
    }
}
