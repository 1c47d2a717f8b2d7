//! Economy and global-state ledger.
//!
//! The single writer for Science Points, Global Stats and mission resolution.

use crate::config::EconomyConfig;
use crate::folding::round_half_up;
use reefwright_data::{FoldingInput, GlobalStats, Mission, MissionStatus};
use serde::{Deserialize, Serialize};

/// Science Points spent to evolve an organism away from the balanced origin.
#[must_use]
pub fn evolution_cost(folding: &FoldingInput) -> i64 {
    round_half_up(folding.displacement() * 100.0) as i64
}

/// Signed change applied to each global stat.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct StatAdjustment {
    pub temperature: f64,
    pub toxicity: f64,
    pub acidity: f64,
    pub extinction_risk: f64,
}

impl StatAdjustment {
    #[must_use]
    pub fn uniform(amount: f64) -> Self {
        Self {
            temperature: amount,
            toxicity: amount,
            acidity: amount,
            extinction_risk: amount,
        }
    }

    /// Applies the adjustment, keeping every stat within `[0, 100]`.
    #[must_use]
    pub fn apply(&self, stats: GlobalStats) -> GlobalStats {
        GlobalStats {
            temperature: stats.temperature + self.temperature,
            toxicity: stats.toxicity + self.toxicity,
            acidity: stats.acidity + self.acidity,
            extinction_risk: stats.extinction_risk + self.extinction_risk,
        }
        .clamped()
    }
}

/// A restoration effect triggered when a successful mission's title mentions any keyword.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RestorationRule {
    pub keywords: Vec<String>,
    pub effect: StatAdjustment,
}

impl RestorationRule {
    #[must_use]
    pub fn new(keywords: &[&str], effect: StatAdjustment) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            effect,
        }
    }

    #[must_use]
    pub fn matches(&self, lowered_title: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| lowered_title.contains(k.to_lowercase().as_str()))
    }
}

/// Keyword table mapping mission titles to planetary restoration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RestorationPolicy {
    pub rules: Vec<RestorationRule>,
}

impl Default for RestorationPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                RestorationRule::new(
                    &["coral", "heat"],
                    StatAdjustment {
                        temperature: -20.0,
                        extinction_risk: -10.0,
                        ..Default::default()
                    },
                ),
                RestorationRule::new(
                    &["plastic", "clean"],
                    StatAdjustment {
                        toxicity: -25.0,
                        ..Default::default()
                    },
                ),
                RestorationRule::new(
                    &["ice", "arctic"],
                    StatAdjustment {
                        temperature: -10.0,
                        acidity: -15.0,
                        ..Default::default()
                    },
                ),
            ],
        }
    }
}

impl RestorationPolicy {
    /// Every rule whose keywords appear in the title, case-insensitively.
    pub fn matching<'a>(&'a self, title: &str) -> impl Iterator<Item = &'a RestorationRule> {
        let lowered = title.to_lowercase();
        self.rules.iter().filter(move |r| r.matches(&lowered))
    }
}

/// Everything one completion changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub mission_id: String,
    pub success: bool,
    pub reward: i64,
    pub evolution_cost: i64,
    pub net: i64,
    pub science_points: i64,
    pub global_stats: GlobalStats,
    pub status: MissionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    science_points: i64,
    global_stats: GlobalStats,
    baseline_drift: f64,
    policy: RestorationPolicy,
    completions: u64,
}

impl Ledger {
    #[must_use]
    pub fn new(
        economy: &EconomyConfig,
        initial_stats: GlobalStats,
        policy: RestorationPolicy,
    ) -> Self {
        Self {
            science_points: economy.starting_science_points,
            global_stats: initial_stats.clamped(),
            baseline_drift: economy.baseline_drift,
            policy,
            completions: 0,
        }
    }

    #[must_use]
    pub fn science_points(&self) -> i64 {
        self.science_points
    }

    #[must_use]
    pub fn global_stats(&self) -> GlobalStats {
        self.global_stats
    }

    #[must_use]
    pub fn completions(&self) -> u64 {
        self.completions
    }

    #[must_use]
    pub fn policy(&self) -> &RestorationPolicy {
        &self.policy
    }

    /// Whether the balance covers a cost without going below zero.
    #[must_use]
    pub fn can_afford(&self, cost: i64) -> bool {
        self.science_points >= cost
    }

    /// Applies a lab purchase (positive) or refund (negative).
    ///
    /// A purchase the balance cannot cover is refused and nothing changes.
    pub fn spend(&mut self, amount: i64) -> bool {
        if amount > 0 && !self.can_afford(amount) {
            return false;
        }
        self.science_points -= amount;
        true
    }

    /// Overrides the temperature stat, e.g. from observed ocean anomalies.
    pub fn seed_temperature(&mut self, temperature: f64) {
        self.global_stats.temperature = temperature.clamp(0.0, 100.0);
    }

    /// Resolves a mission.
    ///
    /// The evolution cost is always charged and the balance is not floored, so a
    /// failed attempt can leave it negative. Missions that are not `Available`
    /// are left untouched and yield `None`.
    pub fn complete_mission(
        &mut self,
        mission: &mut Mission,
        will_succeed: bool,
        folding: &FoldingInput,
    ) -> Option<Settlement> {
        if !mission.is_available() {
            tracing::warn!(
                mission_id = %mission.id,
                status = mission.status.label(),
                "Ignoring completion of a resolved mission"
            );
            return None;
        }

        let cost = evolution_cost(folding);
        let reward = if will_succeed { mission.rewards } else { 0 };
        let net = reward - cost;
        self.science_points += net;

        let mut stats = StatAdjustment::uniform(self.baseline_drift).apply(self.global_stats);
        if will_succeed {
            for rule in self.policy.matching(&mission.title) {
                stats = rule.effect.apply(stats);
            }
        }
        self.global_stats = stats;

        mission.status = if will_succeed {
            MissionStatus::Completed
        } else {
            MissionStatus::Failed
        };
        self.completions += 1;

        tracing::info!(
            mission_id = %mission.id,
            success = will_succeed,
            reward,
            cost,
            science_points = self.science_points,
            "Mission settled"
        );
        if self.global_stats.is_critical() {
            tracing::warn!(
                temperature = self.global_stats.temperature,
                toxicity = self.global_stats.toxicity,
                "Critical planetary instability"
            );
        }

        Some(Settlement {
            mission_id: mission.id.clone(),
            success: will_succeed,
            reward,
            evolution_cost: cost,
            net,
            science_points: self.science_points,
            global_stats: self.global_stats,
            status: mission.status,
        })
    }
}
