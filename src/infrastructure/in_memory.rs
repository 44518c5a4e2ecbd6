use crate::domain::catalog::SolarPotentialData;
use crate::domain::ports::{CatalogSource, Location};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory catalog source.
///
/// Uses `Arc<RwLock<Vec<(Location, SolarPotentialData)>>>` so clones share the
/// same sites. Lookups return the site nearest to the requested location.
#[derive(Default, Clone)]
pub struct InMemoryCatalogSource {
    sites: Arc<RwLock<Vec<(Location, SolarPotentialData)>>>,
}

impl InMemoryCatalogSource {
    /// Creates a new, empty in-memory catalog source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the catalog of the building at `location`.
    pub async fn insert(&self, location: Location, catalog: SolarPotentialData) {
        let mut sites = self.sites.write().await;
        sites.push((location, catalog));
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn find_closest(&self, location: Location) -> Result<Option<SolarPotentialData>> {
        let sites = self.sites.read().await;
        Ok(sites
            .iter()
            .min_by(|(a, _), (b, _)| {
                a.distance_sq(&location)
                    .total_cmp(&b.distance_sq(&location))
            })
            .map(|(_, catalog)| catalog.clone()))
    }
}
