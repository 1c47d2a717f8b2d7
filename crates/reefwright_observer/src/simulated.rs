use crate::OceanDataProvider;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use futures::future::join_all;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reefwright_core::environment::classify;
use reefwright_data::{DataSource, EnvironmentalDataPoint, GeoPoint};
use std::f64::consts::PI;
use std::sync::Mutex;

/// A monitored reef with its long-term mean sea surface temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReefSite {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub baseline_sst: f64,
}

pub const REEF_SITES: [ReefSite; 8] = [
    ReefSite {
        name: "Great Barrier Reef",
        lat: -18.2871,
        lon: 147.6992,
        baseline_sst: 26.5,
    },
    ReefSite {
        name: "Coral Triangle",
        lat: -5.0,
        lon: 120.0,
        baseline_sst: 28.0,
    },
    ReefSite {
        name: "Caribbean Reefs",
        lat: 18.0,
        lon: -77.5,
        baseline_sst: 27.5,
    },
    ReefSite {
        name: "Red Sea Reefs",
        lat: 20.5,
        lon: 38.0,
        baseline_sst: 26.0,
    },
    ReefSite {
        name: "Maldives Atolls",
        lat: 3.2028,
        lon: 73.2207,
        baseline_sst: 28.5,
    },
    ReefSite {
        name: "Hawaiian Reefs",
        lat: 21.3099,
        lon: -157.8581,
        baseline_sst: 25.0,
    },
    ReefSite {
        name: "Seychelles",
        lat: -4.6796,
        lon: 55.4920,
        baseline_sst: 27.8,
    },
    ReefSite {
        name: "Great Chagos Bank",
        lat: -6.3,
        lon: 71.8,
        baseline_sst: 28.0,
    },
];

/// Warm-phase ENSO offset applied to every site.
const EL_NINO_OFFSET: f64 = 1.5;
const SEASONAL_AMPLITUDE: f64 = 2.0;
const NOISE_SPAN: f64 = 0.5;

fn round_tenth(value: f64) -> f64 {
    ((value * 10.0) + 0.5).floor() / 10.0
}

/// Seasonal swing for a site. Southern sites run six months out of phase.
#[must_use]
pub fn seasonal_variation(lat: f64, month0: u32) -> f64 {
    let phase = if lat > 0.0 { month0 % 12 } else { (month0 + 6) % 12 };
    (f64::from(phase) / 12.0 * 2.0 * PI).sin() * SEASONAL_AMPLITUDE
}

/// Synthesizes plausible observations for [`REEF_SITES`].
pub struct SimulatedOceanProvider {
    rng: Mutex<ChaCha8Rng>,
    month0: Option<u32>,
}

impl Default for SimulatedOceanProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SimulatedOceanProvider {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            month0: None,
        }
    }

    /// Pins the calendar month (0 = January) instead of reading the clock.
    #[must_use]
    pub fn with_month(mut self, month0: u32) -> Self {
        self.month0 = Some(month0 % 12);
        self
    }

    fn draw_noise(&self) -> Vec<f64> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        REEF_SITES
            .iter()
            .map(|_| (rng.gen::<f64>() - 0.5) * NOISE_SPAN)
            .collect()
    }
}

/// Builds the observation for one site. The alert tier is taken from the unrounded
/// heating weeks; only the reported figures are rounded.
fn observation(site: &ReefSite, sst: f64, timestamp: DateTime<Utc>) -> EnvironmentalDataPoint {
    let anomaly = sst - site.baseline_sst;
    let raw_dhw = (anomaly * 4.0).max(0.0);
    EnvironmentalDataPoint {
        location: site.name.to_string(),
        coordinates: GeoPoint {
            lat: site.lat,
            lon: site.lon,
        },
        sst: round_tenth(sst),
        sst_anomaly: round_tenth(anomaly),
        alert_level: classify(raw_dhw),
        dhw: round_tenth(raw_dhw),
        timestamp,
        source: DataSource::Simulated,
    }
}

async fn sample_site(
    site: ReefSite,
    month0: u32,
    noise: f64,
    timestamp: DateTime<Utc>,
) -> EnvironmentalDataPoint {
    let sst = site.baseline_sst + seasonal_variation(site.lat, month0) + EL_NINO_OFFSET + noise;
    observation(&site, sst, timestamp)
}

#[async_trait]
impl OceanDataProvider for SimulatedOceanProvider {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch_data_points(&self) -> Result<Vec<EnvironmentalDataPoint>> {
        let now = Utc::now();
        let month0 = self.month0.unwrap_or_else(|| now.month0());
        let noise = self.draw_noise();
        let points = join_all(
            REEF_SITES
                .iter()
                .zip(noise)
                .map(|(site, n)| sample_site(*site, month0, n, now)),
        )
        .await;
        tracing::debug!(sites = points.len(), month0, "Simulated ocean observations");
        Ok(points)
    }
}
