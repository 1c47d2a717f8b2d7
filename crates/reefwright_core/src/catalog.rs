//! Mission catalog: the canonical, ordered list of missions.

use crate::environment::build_mission;
use reefwright_data::{
    DifficultyVector, EnvironmentalDataPoint, GeoPoint, Mission, MissionStatus,
};
use serde::{Deserialize, Serialize};

/// Where the catalog's missions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogOrigin {
    /// Built-in seed list, used whenever environmental data is missing.
    Static,
    /// Synthesized from environmental data points.
    Generated,
    /// Handed over as-is by the caller.
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionCatalog {
    missions: Vec<Mission>,
    origin: CatalogOrigin,
}

impl Default for MissionCatalog {
    fn default() -> Self {
        Self::static_seed()
    }
}

impl MissionCatalog {
    /// The fixed fallback list.
    #[must_use]
    pub fn static_seed() -> Self {
        let missions = vec![
            Mission {
                id: "m1_coral".to_string(),
                title: "Great Barrier Reef".to_string(),
                location: GeoPoint {
                    lat: -18.2871,
                    lon: 147.6992,
                },
                description:
                    "Severe bleaching event detected. Sea surface temperatures exceeding 30°C."
                        .to_string(),
                difficulty: DifficultyVector {
                    temp: 40.0,
                    virulence: 0.0,
                    pollution: 5.0,
                    currents: 10.0,
                },
                status: MissionStatus::Available,
                rewards: 100,
            },
            Mission {
                id: "m2_gyre".to_string(),
                title: "Great Pacific Garbage Patch".to_string(),
                location: GeoPoint {
                    lat: 32.0,
                    lon: -145.0,
                },
                description: "High concentration of microplastics. Filter feeders required."
                    .to_string(),
                difficulty: DifficultyVector {
                    temp: 10.0,
                    virulence: 0.0,
                    pollution: 50.0,
                    currents: 5.0,
                },
                status: MissionStatus::Available,
                rewards: 150,
            },
            Mission {
                id: "m3_baltic".to_string(),
                title: "Baltic Sea Dead Zone".to_string(),
                location: GeoPoint {
                    lat: 59.0,
                    lon: 20.0,
                },
                description: "Anoxic waters due to eutrophication. Needs resilient organisms."
                    .to_string(),
                difficulty: DifficultyVector {
                    temp: 15.0,
                    virulence: 30.0,
                    pollution: 20.0,
                    currents: 5.0,
                },
                status: MissionStatus::Available,
                rewards: 200,
            },
        ];
        Self {
            missions,
            origin: CatalogOrigin::Static,
        }
    }

    /// Builds one mission per data point. An empty slice yields the static list
    /// instead, never a partial merge.
    #[must_use]
    pub fn from_data_points(points: &[EnvironmentalDataPoint]) -> Self {
        if points.is_empty() {
            return Self::static_seed();
        }
        Self {
            missions: points.iter().map(build_mission).collect(),
            origin: CatalogOrigin::Generated,
        }
    }

    /// Wraps a caller-supplied mission list, statuses included.
    #[must_use]
    pub fn from_missions(missions: Vec<Mission>) -> Self {
        Self {
            missions,
            origin: CatalogOrigin::Custom,
        }
    }

    #[must_use]
    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }

    #[must_use]
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.missions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    pub fn available(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter().filter(|m| m.is_available())
    }

    /// Ids of every mission still open, in catalog order.
    #[must_use]
    pub fn available_ids(&self) -> Vec<String> {
        self.available().map(|m| m.id.clone()).collect()
    }

    /// Number of missions in the given status.
    #[must_use]
    pub fn count(&self, status: MissionStatus) -> usize {
        self.missions.iter().filter(|m| m.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefwright_data::{AlertLevel, DataSource};

    fn point(location: &str, dhw: f64) -> EnvironmentalDataPoint {
        EnvironmentalDataPoint {
            location: location.to_string(),
            coordinates: GeoPoint { lat: 10.0, lon: 20.0 },
            sst: 28.0,
            sst_anomaly: dhw / 4.0,
            alert_level: crate::environment::classify(dhw),
            dhw,
            timestamp: Default::default(),
            source: DataSource::Simulated,
        }
    }

    #[test]
    fn test_static_seed_all_available() {
        let catalog = MissionCatalog::static_seed();
        assert_eq!(catalog.origin(), CatalogOrigin::Static);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.count(MissionStatus::Available), 3);
        assert_eq!(catalog.available_ids(), vec!["m1_coral", "m2_gyre", "m3_baltic"]);
    }

    #[test]
    fn test_generated_catalog_keeps_order() {
        let catalog = MissionCatalog::from_data_points(&[
            point("Coral Triangle", 1.0),
            point("Seychelles", 9.0),
        ]);
        assert_eq!(catalog.origin(), CatalogOrigin::Generated);
        assert_eq!(catalog.available_ids(), vec!["reef_coral_triangle", "reef_seychelles"]);
        let seychelles = catalog.get("reef_seychelles").unwrap();
        assert_eq!(seychelles.rewards, 300);
        assert_eq!(
            crate::environment::classify(9.0),
            AlertLevel::Alert2,
            "fixture should be at the top tier"
        );
    }

    #[test]
    fn test_empty_points_fall_back_to_static() {
        let catalog = MissionCatalog::from_data_points(&[]);
        assert_eq!(catalog.origin(), CatalogOrigin::Static);
        assert!(catalog.get("m1_coral").is_some());
    }

    #[test]
    fn test_unknown_mission() {
        let catalog = MissionCatalog::static_seed();
        assert!(catalog.get("m9_nowhere").is_none());
    }
}
