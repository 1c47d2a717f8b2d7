use serde::{Deserialize, Serialize};

/// Environmental stress a mission imposes, one value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DifficultyVector {
    /// Water temperature in °C; converted to a heat-resistance requirement.
    pub temp: f64,
    /// Checked against structural integrity.
    pub virulence: f64,
    /// Checked against filtration.
    pub pollution: f64,
    /// Checked against growth.
    pub currents: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    Locked,
    #[default]
    Available,
    Completed,
    Failed,
}

impl MissionStatus {
    /// `Completed` and `Failed` are final.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionStatus::Completed | MissionStatus::Failed)
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MissionStatus::Locked => "LOCKED",
            MissionStatus::Available => "AVAILABLE",
            MissionStatus::Completed => "COMPLETED",
            MissionStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub location: GeoPoint,
    pub description: String,
    pub difficulty: DifficultyVector,
    pub status: MissionStatus,
    /// Science Points granted on success.
    pub rewards: i64,
}

impl Mission {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == MissionStatus::Available
    }
}
