//! Bounded catalog loading with static fallback.

use crate::OceanDataProvider;
use reefwright_core::environment::global_temperature;
use reefwright_core::{CatalogOrigin, MissionCatalog};
use reefwright_data::EnvironmentalDataPoint;
use std::time::Duration;

/// Catalog plus the observations it was generated from (empty on fallback).
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: MissionCatalog,
    pub points: Vec<EnvironmentalDataPoint>,
    /// Why the static list was used, if it was.
    pub fallback_reason: Option<String>,
}

impl LoadedCatalog {
    fn fallback(reason: String) -> Self {
        Self {
            catalog: MissionCatalog::static_seed(),
            points: Vec::new(),
            fallback_reason: Some(reason),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.catalog.origin() == CatalogOrigin::Static
    }

    /// Starting planet temperature implied by the observations.
    #[must_use]
    pub fn global_temperature(&self) -> Option<f64> {
        global_temperature(&self.points)
    }
}

/// Awaits the provider for at most `timeout`.
///
/// Errors, timeouts and empty results all yield the static catalog; nothing is
/// surfaced beyond a warning.
pub async fn load_catalog(provider: &dyn OceanDataProvider, timeout: Duration) -> LoadedCatalog {
    let reason = match tokio::time::timeout(timeout, provider.fetch_data_points()).await {
        Ok(Ok(points)) if !points.is_empty() => {
            let catalog = MissionCatalog::from_data_points(&points);
            tracing::info!(
                provider = provider.name(),
                missions = catalog.len(),
                "Generated mission catalog from ocean data"
            );
            return LoadedCatalog {
                catalog,
                points,
                fallback_reason: None,
            };
        }
        Ok(Ok(_)) => "provider returned no observations".to_string(),
        Ok(Err(e)) => format!("provider failed: {e}"),
        Err(_) => format!("provider timed out after {}ms", timeout.as_millis()),
    };
    tracing::warn!(provider = provider.name(), reason = %reason, "Using static mission catalog");
    LoadedCatalog::fallback(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatedOceanProvider;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FailingProvider;

    #[async_trait]
    impl OceanDataProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_data_points(&self) -> Result<Vec<EnvironmentalDataPoint>> {
            Err(anyhow::anyhow!("feed offline"))
        }
    }

    struct EmptyProvider;

    #[async_trait]
    impl OceanDataProvider for EmptyProvider {
        fn name(&self) -> &str {
            "empty"
        }

        async fn fetch_data_points(&self) -> Result<Vec<EnvironmentalDataPoint>> {
            Ok(Vec::new())
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl OceanDataProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch_data_points(&self) -> Result<Vec<EnvironmentalDataPoint>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            SimulatedOceanProvider::new(Some(1)).fetch_data_points().await
        }
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_static() {
        let loaded = load_catalog(&FailingProvider, Duration::from_millis(100)).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.catalog.len(), 3);
        assert!(loaded.global_temperature().is_none());
        assert!(loaded.fallback_reason.unwrap().contains("feed offline"));
    }

    #[tokio::test]
    async fn test_empty_falls_back_to_static() {
        let loaded = load_catalog(&EmptyProvider, Duration::from_millis(100)).await;
        assert!(loaded.is_fallback());
        assert!(loaded.catalog.get("m1_coral").is_some());
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_static() {
        let loaded = load_catalog(&SlowProvider, Duration::from_millis(20)).await;
        assert!(loaded.is_fallback());
        assert!(loaded.fallback_reason.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_simulated_generates_catalog() {
        let provider = SimulatedOceanProvider::new(Some(9)).with_month(2);
        let loaded = load_catalog(&provider, Duration::from_secs(1)).await;
        assert!(!loaded.is_fallback());
        assert_eq!(loaded.catalog.len(), 8);
        assert_eq!(loaded.points.len(), 8);
        assert!(loaded.catalog.get("reef_great_barrier_reef").is_some());
        let temp = loaded.global_temperature().unwrap();
        assert!((0.0..=100.0).contains(&temp));
    }
}
