use reefwright_core::{AppConfig, MissionCatalog, Session};
use reefwright_data::{DifficultyVector, GeoPoint, Mission, MissionStatus};

#[allow(dead_code)]
pub struct SessionBuilder {
    config: AppConfig,
    catalog: MissionCatalog,
}

#[allow(dead_code)]
impl SessionBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(0);
        Self {
            config,
            catalog: MissionCatalog::static_seed(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_missions(mut self, missions: Vec<Mission>) -> Self {
        self.catalog = MissionCatalog::from_missions(missions);
        self
    }

    pub fn build(self) -> Session {
        Session::new(self.config, self.catalog)
    }
}

#[allow(dead_code)]
pub fn mission(id: &str, title: &str, difficulty: DifficultyVector, rewards: i64) -> Mission {
    Mission {
        id: id.to_string(),
        title: title.to_string(),
        location: GeoPoint::default(),
        description: String::new(),
        difficulty,
        status: MissionStatus::Available,
        rewards,
    }
}

/// A mission the balanced organism cannot survive.
#[allow(dead_code)]
pub fn hopeless(id: &str, title: &str) -> Mission {
    mission(
        id,
        title,
        DifficultyVector {
            temp: 40.0,
            virulence: 80.0,
            pollution: 80.0,
            currents: 80.0,
        },
        100,
    )
}

/// A mission the balanced organism survives untouched.
#[allow(dead_code)]
pub fn trivial(id: &str, title: &str) -> Mission {
    mission(id, title, DifficultyVector::default(), 100)
}
