//! Configuration management for engine parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `reefwright.toml` file. Every tunable constant of the rules engine is
//! exposed here with the tuned value as its default.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `reefwright.toml` file (overrides defaults)
//! 3. Command line flags of the headless runner (seed, endpoint)
//!
//! ## Example `reefwright.toml`
//!
//! ```toml
//! [economy]
//! starting_science_points = 100
//! baseline_drift = 5.0
//!
//! [simulation]
//! tick_period_ms = 100
//! success_threshold = 30.0
//! seed = 42
//!
//! [provider]
//! fetch_timeout_ms = 5000
//! ```

use crate::ledger::RestorationPolicy;
use reefwright_data::GlobalStats;
use serde::{Deserialize, Serialize};

/// Currency rules.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_science_points: i64,
    /// Added to every global stat on each mission completion.
    pub baseline_drift: f64,
    /// Reject deployments whose evolution cost exceeds the current balance.
    pub enforce_deploy_affordability: bool,
    /// Number of module slots in the lab loadout.
    pub loadout_slots: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_science_points: 100,
            baseline_drift: 5.0,
            enforce_deploy_affordability: true,
            loadout_slots: crate::loadout::DEFAULT_SLOTS,
        }
    }
}

/// Outcome scoring and deployment pacing.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_period_ms: u64,
    pub success_increment: f64,
    pub failure_increment: f64,
    /// A deployment succeeds when the survival score is strictly above this.
    pub success_threshold: f64,
    /// Water temperature (°C) at which no heat resistance is required.
    pub temperature_baseline: f64,
    /// Heat-resistance points required per °C above the baseline.
    pub temperature_scale: f64,
    pub log_capacity: usize,
    /// Probability per tick of appending a flavor line.
    pub flavor_chance: f64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            success_increment: 2.0,
            failure_increment: 0.5,
            success_threshold: 30.0,
            temperature_baseline: 20.0,
            temperature_scale: 6.6,
            log_capacity: 5,
            flavor_chance: 0.05,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub initial_stats: GlobalStats,
    /// Replace the initial temperature with one derived from live/simulated ocean data.
    pub seed_temperature_from_data: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_stats: GlobalStats::default(),
            seed_temperature_from_data: true,
        }
    }
}

/// Environmental data provider settings.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub fetch_timeout_ms: u64,
    /// JSON endpoint serving an array of data points. Simulated data is used when unset.
    pub endpoint: Option<String>,
    pub max_retries: u32,
    pub seed: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 5000,
            endpoint: None,
            max_retries: 3,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub economy: EconomyConfig,
    pub simulation: SimulationConfig,
    pub world: WorldConfig,
    pub provider: ProviderConfig,
    pub restoration: RestorationPolicy,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.economy.baseline_drift >= 0.0,
            "Baseline drift must be non-negative"
        );

        anyhow::ensure!(
            self.economy.loadout_slots > 0,
            "Loadout must have at least one slot"
        );

        let sim = &self.simulation;
        anyhow::ensure!(sim.tick_period_ms > 0, "Tick period must be positive");
        anyhow::ensure!(
            sim.success_increment > 0.0,
            "Success increment must be positive"
        );
        anyhow::ensure!(
            sim.failure_increment > 0.0,
            "Failure increment must be positive"
        );
        anyhow::ensure!(
            sim.success_threshold.is_finite(),
            "Success threshold must be finite"
        );
        anyhow::ensure!(
            sim.temperature_scale >= 0.0,
            "Temperature scale must be non-negative"
        );
        anyhow::ensure!(sim.log_capacity > 0, "Log capacity must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&sim.flavor_chance),
            "Flavor chance must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.world.initial_stats.in_bounds(),
            "Initial global stats must be in [0, 100]"
        );

        anyhow::ensure!(
            self.provider.fetch_timeout_ms > 0,
            "Provider fetch timeout must be positive"
        );
        anyhow::ensure!(
            self.provider.max_retries > 0,
            "Provider retries must be at least 1"
        );

        for rule in &self.restoration.rules {
            anyhow::ensure!(
                !rule.keywords.is_empty(),
                "Restoration rule must name at least one keyword"
            );
            anyhow::ensure!(
                rule.keywords.iter().all(|k| !k.trim().is_empty()),
                "Restoration keywords must not be blank"
            );
        }

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of every rule-affecting section, logged at session start.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.economy).as_bytes());
        hasher.update(format!("{:?}", self.simulation).as_bytes());
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.restoration).as_bytes());
        hex::encode(hasher.finalize())
    }
}
