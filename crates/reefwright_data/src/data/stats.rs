use serde::{Deserialize, Serialize};

/// Upper bound shared by every global stat.
pub const STAT_MAX: f64 = 100.0;

/// Planet-wide health vector. Every field lives in `[0, 100]`; higher is worse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub temperature: f64,
    pub toxicity: f64,
    pub acidity: f64,
    pub extinction_risk: f64,
}

impl Default for GlobalStats {
    fn default() -> Self {
        Self {
            temperature: 40.0,
            toxicity: 30.0,
            acidity: 30.0,
            extinction_risk: 20.0,
        }
    }
}

impl GlobalStats {
    /// Returns a copy with every field forced into `[0, 100]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            temperature: self.temperature.clamp(0.0, STAT_MAX),
            toxicity: self.toxicity.clamp(0.0, STAT_MAX),
            acidity: self.acidity.clamp(0.0, STAT_MAX),
            extinction_risk: self.extinction_risk.clamp(0.0, STAT_MAX),
        }
    }

    #[must_use]
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.temperature,
            self.toxicity,
            self.acidity,
            self.extinction_risk,
        ]
    }

    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.as_array()
            .iter()
            .all(|v| (0.0..=STAT_MAX).contains(v))
    }

    /// Planetary instability: runaway heat or toxicity.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.temperature > 80.0 || self.toxicity > 80.0
    }
}
