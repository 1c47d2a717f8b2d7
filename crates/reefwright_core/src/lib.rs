//! # Reefwright Core
//!
//! Rules engine for Reefwright, a planetary-restoration strategy game in which the
//! player designs marine organisms and deploys them to threatened ocean sites.
//!
//! This crate contains the deterministic game logic, including:
//! - Folding matrix to organism attribute mapping
//! - Mission synthesis from ocean observations
//! - Survival scoring and the timed deployment process
//! - The Science Point economy and global planet stats
//! - The session state machine tying the above together
//! - Metrics collection and structured logging
//!
//! ## Example
//!
//! ```
//! use reefwright_core::{AppConfig, MissionCatalog, Phase, Session};
//!
//! let mut session = Session::new(AppConfig::default(), MissionCatalog::static_seed());
//! session.select_mission("m2_gyre").unwrap();
//! session.set_folding(0.5, 0.0);
//! session.deploy().unwrap();
//!
//! let settlement = session.run_to_completion().unwrap();
//! assert!(settlement.success);
//! assert_eq!(session.phase(), Phase::Result);
//! ```

/// Folding recommendations for automated play
pub mod advisor;
/// Mission catalog (static seed or generated from ocean data)
pub mod catalog;
/// Configuration management for economy and simulation parameters
pub mod config;
/// Timed deployment runs with a rolling status log
pub mod deployment;
/// Ocean observation classification and mission synthesis
pub mod environment;
/// Session error types
pub mod error;
/// Folding matrix quantization and attribute mapping
pub mod folding;
/// Science Point economy and global stats
pub mod ledger;
/// Lab module loadout
pub mod loadout;
/// Performance metrics collection and logging
pub mod metrics;
/// Phase state machine
pub mod session;
/// Deterministic survival scoring
pub mod simulator;

pub use catalog::{CatalogOrigin, MissionCatalog};
pub use config::AppConfig;
pub use error::{Result, SessionError};
pub use ledger::{Ledger, Settlement};
pub use loadout::{Loadout, ModuleKind};
pub use metrics::{init_logging, Metrics};
pub use session::{Phase, Session, SessionView};
pub use simulator::Outcome;
