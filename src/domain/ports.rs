use super::catalog::SolarPotentialData;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Squared coordinate distance, sufficient for ranking nearby sites.
    pub fn distance_sq(&self, other: &Location) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        dlat * dlat + dlon * dlon
    }
}

/// Provider of the solar potential catalog for a building.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the catalog of the building closest to `location`, if any.
    async fn find_closest(&self, location: Location) -> Result<Option<SolarPotentialData>>;
}

pub type CatalogSourceBox = Box<dyn CatalogSource>;
pub type CatalogSourceFactory = Box<dyn Fn() -> CatalogSourceBox + Send + Sync>;
