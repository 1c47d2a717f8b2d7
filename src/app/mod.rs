//! Application bootstrap: configuration, data provider selection and session start.

pub mod campaign;

use anyhow::{Context, Result};
use reefwright_core::{AppConfig, Session};
use reefwright_observer::{
    load_catalog, HttpOceanProvider, OceanDataProvider, SimulatedOceanProvider,
};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use campaign::{run_campaign, CampaignReport, MissionReport};

/// Reads and validates a TOML config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    AppConfig::from_toml(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// HTTP when an endpoint is configured, otherwise the simulated reef feed.
#[must_use]
pub fn build_provider(config: &AppConfig) -> Box<dyn OceanDataProvider> {
    match config.provider.endpoint.as_deref() {
        Some(endpoint) if !endpoint.is_empty() => Box::new(HttpOceanProvider::new(
            endpoint,
            Duration::from_millis(config.provider.fetch_timeout_ms),
            config.provider.max_retries,
        )),
        _ => Box::new(SimulatedOceanProvider::new(config.provider.seed)),
    }
}

pub struct App {
    pub session: Session,
    /// Whether the catalog came from the static list.
    pub fallback: bool,
}

impl App {
    /// Loads the mission catalog through `provider` and opens a session on it.
    pub async fn start(config: AppConfig, provider: &dyn OceanDataProvider) -> Result<Self> {
        config.validate()?;
        let timeout = Duration::from_millis(config.provider.fetch_timeout_ms);
        let loaded = load_catalog(provider, timeout).await;
        let fallback = loaded.is_fallback();
        let seeded_temperature = if config.world.seed_temperature_from_data {
            loaded.global_temperature()
        } else {
            None
        };

        let mut session = Session::new(config, loaded.catalog);
        if let Some(temperature) = seeded_temperature {
            tracing::info!(temperature, "Seeding planet temperature from ocean data");
            session.seed_temperature(temperature);
        }
        Ok(Self { session, fallback })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefwright_core::CatalogOrigin;

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.economy.starting_science_points, 100);
    }

    #[tokio::test]
    async fn test_start_with_simulated_provider() {
        let mut config = AppConfig::default();
        config.provider.seed = Some(5);
        config.simulation.seed = Some(5);
        let provider = build_provider(&config);
        let app = App::start(config, provider.as_ref()).await.unwrap();
        assert!(!app.fallback);
        assert_eq!(app.session.catalog().origin(), CatalogOrigin::Generated);
        // hemispheres cancel seasonally, leaving the El Niño offset
        let temperature = app.session.global_stats().temperature;
        assert!((64.0..=76.0).contains(&temperature));
    }
}
