use crate::domain::catalog::{BuildingInsights, SolarPotentialData};
use crate::domain::ports::{CatalogSource, Location};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a saved building insights response from disk.
///
/// The file describes a single building, so every location resolves to it.
/// A response without a `solarPotential` section yields `None`.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn find_closest(&self, _location: Location) -> Result<Option<SolarPotentialData>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let insights: BuildingInsights = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), found = insights.solar_potential.is_some(), "read building insights");
        Ok(insights.solar_potential)
    }
}
