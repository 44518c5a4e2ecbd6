use super::matcher::{NearestConfigurations, find_nearest_configurations};
use super::projector::FinancialProjector;
use crate::domain::catalog::SolarPotentialData;
use crate::domain::ports::{CatalogSource, Location};
use crate::domain::projection::FinancialProjection;
use crate::error::{ProjectionError, Result};
use tracing::{debug, info};

/// Outcome of evaluating a panel count against a site.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    /// The catalog has this exact configuration.
    Projected(FinancialProjection),
    /// No exact configuration; these are the nearest available counts.
    Suggested(NearestConfigurations),
}

/// Explores panel counts for one site.
///
/// `Advisor` composes the projector and the matcher: every evaluation first
/// attempts an exact projection and only falls back to the matcher when the
/// catalog has no configuration for the requested count.
#[derive(Debug, Clone)]
pub struct Advisor {
    catalog: SolarPotentialData,
    projector: FinancialProjector,
}

impl Advisor {
    /// Creates an advisor over an already validated catalog.
    pub fn new(catalog: SolarPotentialData, projector: FinancialProjector) -> Result<Self> {
        catalog.validate()?;
        Ok(Self { catalog, projector })
    }

    /// Loads the catalog of the building closest to `location`.
    pub async fn load(
        source: &dyn CatalogSource,
        location: Location,
        projector: FinancialProjector,
    ) -> Result<Self> {
        let catalog = source.find_closest(location).await?.ok_or_else(|| {
            ProjectionError::CatalogUnavailable(format!(
                "No solar potential data found for {}, {}",
                location.latitude, location.longitude
            ))
        })?;
        info!(
            configs = catalog.solar_panel_configs.len(),
            max_panels = catalog.max_array_panels_count,
            "loaded site catalog"
        );
        Self::new(catalog, projector)
    }

    pub fn catalog(&self) -> &SolarPotentialData {
        &self.catalog
    }

    pub fn projector(&self) -> &FinancialProjector {
        &self.projector
    }

    /// Clamps `panels` into the catalog's available range.
    ///
    /// An empty catalog has no range and leaves the request unchanged.
    pub fn clamp_panels(&self, panels: u32) -> u32 {
        match self.catalog.panel_range() {
            Some((min, max)) => panels.clamp(min, max),
            None => panels,
        }
    }

    /// Panel count an exploration starts from.
    pub fn initial_panels(&self) -> Option<u32> {
        self.catalog.initial_panels()
    }

    /// Projects `panels` against the catalog, suggesting nearby counts when
    /// the exact configuration does not exist.
    pub fn evaluate(&self, panels: u32, monthly_bill: f64) -> Result<Assessment> {
        if !monthly_bill.is_finite() || monthly_bill < 0.0 {
            return Err(ProjectionError::ValidationError(format!(
                "Monthly bill must be a non-negative amount, got {monthly_bill}"
            )));
        }

        match self.projector.project(&self.catalog, panels, monthly_bill) {
            Ok(projection) => Ok(Assessment::Projected(projection)),
            Err(not_found) => {
                let nearest =
                    find_nearest_configurations(&self.catalog.solar_panel_configs, not_found.panels);
                debug!(panels, ?nearest, "suggesting nearest configurations");
                Ok(Assessment::Suggested(nearest))
            }
        }
    }

    /// Projects every available configuration in ascending panel order.
    pub fn sweep(&self, monthly_bill: f64) -> Result<Vec<FinancialProjection>> {
        let mut counts: Vec<u32> = self
            .catalog
            .solar_panel_configs
            .iter()
            .map(|c| c.panels_count)
            .collect();
        counts.sort_unstable();

        let mut projections = Vec::with_capacity(counts.len());
        for panels in counts {
            if let Assessment::Projected(projection) = self.evaluate(panels, monthly_bill)? {
                projections.push(projection);
            }
        }
        Ok(projections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::SiteConfiguration;
    use crate::infrastructure::in_memory::InMemoryCatalogSource;

    fn catalog() -> SolarPotentialData {
        SolarPotentialData::with_configs(vec![
            SiteConfiguration::new(15, 6000.0),
            SiteConfiguration::new(5, 2000.0),
            SiteConfiguration::new(10, 4000.0),
        ])
    }

    fn advisor() -> Advisor {
        Advisor::new(catalog(), FinancialProjector::default()).unwrap()
    }

    #[test]
    fn test_evaluate_exact_match() {
        match advisor().evaluate(10, 100.0).unwrap() {
            Assessment::Projected(projection) => assert_eq!(projection.panels_count, 10),
            other => panic!("expected projection, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_falls_back_to_matcher() {
        let assessment = advisor().evaluate(12, 100.0).unwrap();
        assert_eq!(
            assessment,
            Assessment::Suggested(NearestConfigurations {
                lower: Some(10),
                higher: Some(15),
            })
        );
    }

    #[test]
    fn test_evaluate_rejects_invalid_bill() {
        assert!(matches!(
            advisor().evaluate(10, -1.0),
            Err(ProjectionError::ValidationError(_))
        ));
        assert!(advisor().evaluate(10, f64::NAN).is_err());
    }

    #[test]
    fn test_clamp_panels() {
        let advisor = advisor();
        assert_eq!(advisor.clamp_panels(1), 5);
        assert_eq!(advisor.clamp_panels(12), 12);
        assert_eq!(advisor.clamp_panels(40), 15);

        let empty = Advisor::new(SolarPotentialData::default(), FinancialProjector::default())
            .unwrap();
        assert_eq!(empty.clamp_panels(7), 7);
        assert_eq!(
            empty.evaluate(7, 100.0).unwrap(),
            Assessment::Suggested(NearestConfigurations::default())
        );
    }

    #[test]
    fn test_initial_panels_without_matching_config() {
        let advisor = advisor();
        assert_eq!(advisor.initial_panels(), Some(4));
        assert!(matches!(
            advisor.evaluate(4, 100.0).unwrap(),
            Assessment::Suggested(NearestConfigurations {
                lower: None,
                higher: Some(5)
            })
        ));
    }

    #[test]
    fn test_sweep_is_ordered() {
        let projections = advisor().sweep(100.0).unwrap();
        let counts: Vec<u32> = projections.iter().map(|p| p.panels_count).collect();
        assert_eq!(counts, vec![5, 10, 15]);
        assert!(projections[0].installation_cost < projections[2].installation_cost);
    }

    #[test]
    fn test_new_rejects_invalid_catalog() {
        let duplicated = SolarPotentialData::with_configs(vec![
            SiteConfiguration::new(5, 2000.0),
            SiteConfiguration::new(5, 2100.0),
        ]);
        assert!(Advisor::new(duplicated, FinancialProjector::default()).is_err());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = InMemoryCatalogSource::new();
        source.insert(Location::new(40.4, -3.7), catalog()).await;

        let location = Location::new(40.41, -3.69);
        let advisor = Advisor::load(&source, location, FinancialProjector::default())
            .await
            .unwrap();
        assert_eq!(advisor.catalog().panel_range(), Some((5, 15)));
    }

    #[tokio::test]
    async fn test_load_from_empty_source() {
        let source = InMemoryCatalogSource::new();
        let result =
            Advisor::load(&source, Location::new(0.0, 0.0), FinancialProjector::default()).await;
        assert!(matches!(result, Err(ProjectionError::CatalogUnavailable(_))));
    }
}
