//! Ocean observation providers.
//!
//! The core treats environmental data as a black box: something that eventually
//! yields one [`EnvironmentalDataPoint`] per reef site, or fails. This crate holds
//! that seam plus two adapters and the bounded loader the session starts from.

use anyhow::Result;
use async_trait::async_trait;
use reefwright_data::EnvironmentalDataPoint;

pub mod http;
pub mod loader;
pub mod simulated;

pub use http::HttpOceanProvider;
pub use loader::{load_catalog, LoadedCatalog};
pub use simulated::{ReefSite, SimulatedOceanProvider, REEF_SITES};

#[async_trait]
pub trait OceanDataProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn fetch_data_points(&self) -> Result<Vec<EnvironmentalDataPoint>>;
}
