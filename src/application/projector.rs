use crate::domain::catalog::{SiteConfiguration, SolarPotentialData};
use crate::domain::parameters::RunParameters;
use crate::domain::projection::{FinancialProjection, YearProjection};
use crate::error::{ConfigurationNotFound, Result};
use tracing::debug;

/// Simulates the financial outcome of a catalog configuration over the
/// installation's service life.
///
/// The projector is stateless apart from its immutable [`RunParameters`], so a
/// single instance can be shared across threads and reused for any number of
/// catalogs.
#[derive(Debug, Clone, Default)]
pub struct FinancialProjector {
    params: RunParameters,
}

impl FinancialProjector {
    /// Creates a projector bound to a validated parameter set.
    pub fn new(params: RunParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    /// Installed cost of an array of `panels` nominal-capacity panels.
    pub fn installation_cost(&self, panels: u32) -> f64 {
        let installation_size_kw = panels as f64 * self.params.panel_capacity_watts / 1000.0;
        installation_size_kw * self.params.cost_per_kw_installed
    }

    /// Yearly grid consumption implied by a monthly bill.
    ///
    /// Constant for every projected year.
    pub fn yearly_consumption_kwh(&self, monthly_bill: f64) -> f64 {
        let monthly_kwh = monthly_bill / self.params.energy_cost_per_kwh;
        monthly_kwh * 12.0
    }

    /// Builds the year-by-year production and cost rows for `config`.
    ///
    /// Production decays geometrically from the derated year-0 output. The
    /// bill with solar is clamped at zero: surplus production is neither sold
    /// nor banked.
    pub fn schedule(&self, config: &SiteConfiguration, monthly_bill: f64) -> Vec<YearProjection> {
        let p = &self.params;
        let yearly_kwh_consumption = self.yearly_consumption_kwh(monthly_bill);
        let initial_ac_kwh = config.yearly_energy_dc_kwh * p.dc_to_ac_derate;

        let mut cumulative_savings = 0.0;
        (0..p.installation_lifespan_years)
            .map(|year| {
                let exponent = year as i32;
                let price_growth = p.cost_increase_factor.powi(exponent);
                let discount = p.discount_rate.powi(exponent);

                let production_ac_kwh =
                    initial_ac_kwh * p.efficiency_depreciation_factor.powi(exponent);
                let bill_energy_kwh = yearly_kwh_consumption - production_ac_kwh;
                let utility_bill =
                    (bill_energy_kwh * p.energy_cost_per_kwh * price_growth / discount).max(0.0);
                let cost_without_solar = monthly_bill * 12.0 * price_growth / discount;

                cumulative_savings += cost_without_solar - utility_bill;
                YearProjection {
                    year,
                    production_ac_kwh,
                    utility_bill,
                    cost_without_solar,
                    cumulative_savings,
                }
            })
            .collect()
    }

    /// Projects the financial outcome of installing `panels` panels.
    ///
    /// Fails only when the catalog has no configuration with exactly that
    /// many panels; the caller decides how to fall back. A zero monthly bill
    /// is accepted and yields an infinite coverage figure.
    pub fn project(
        &self,
        catalog: &SolarPotentialData,
        panels: u32,
        monthly_bill: f64,
    ) -> std::result::Result<FinancialProjection, ConfigurationNotFound> {
        let Some(config) = catalog.config_for(panels) else {
            debug!(panels, "no configuration for requested panel count");
            return Err(ConfigurationNotFound { panels });
        };

        let lifespan = self.params.installation_lifespan_years;
        let installation_cost = self.installation_cost(panels);
        let schedule = self.schedule(config, monthly_bill);

        let remaining_utility_bill: f64 = schedule.iter().map(|y| y.utility_bill).sum();
        let total_cost_with_solar =
            installation_cost + remaining_utility_bill - self.params.solar_incentives;
        let total_cost_without_solar: f64 = schedule.iter().map(|y| y.cost_without_solar).sum();

        // Coverage uses year-0 DC output, not the derated AC curve.
        let yearly_energy_coverage =
            config.yearly_energy_dc_kwh / self.yearly_consumption_kwh(monthly_bill) * 100.0;

        let years_until_break_even = schedule
            .iter()
            .find(|y| y.cumulative_savings >= installation_cost)
            .map(|y| y.year + 1)
            .unwrap_or(lifespan);

        debug!(
            panels,
            monthly_bill, installation_cost, years_until_break_even, "projection complete"
        );

        Ok(FinancialProjection {
            panels_count: panels,
            yearly_energy_dc_kwh: config.yearly_energy_dc_kwh,
            yearly_energy_coverage,
            total_cost_without_solar,
            total_cost_with_solar,
            installation_cost,
            years_until_break_even,
            lifetime_savings: total_cost_without_solar - total_cost_with_solar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn single_config_catalog() -> SolarPotentialData {
        SolarPotentialData::with_configs(vec![SiteConfiguration::new(10, 4000.0)])
    }

    #[test]
    fn test_installation_cost() {
        let projector = FinancialProjector::default();
        assert!((projector.installation_cost(10) - 4515.3).abs() < EPSILON);
        assert_eq!(projector.installation_cost(0), 0.0);
    }

    #[test]
    fn test_surplus_year_is_clamped() {
        let projector = FinancialProjector::default();
        let config = SiteConfiguration::new(10, 4000.0);
        let schedule = projector.schedule(&config, 100.0);

        assert_eq!(schedule.len(), 25);
        assert!((projector.yearly_consumption_kwh(100.0) - 3157.894736842105).abs() < EPSILON);
        assert!((schedule[0].production_ac_kwh - 3400.0).abs() < EPSILON);
        assert_eq!(schedule[0].utility_bill, 0.0);
        assert!((schedule[0].cost_without_solar - 1200.0).abs() < EPSILON);
        assert!(schedule.iter().all(|y| y.utility_bill >= 0.0));
    }

    #[test]
    fn test_production_degrades_every_year() {
        let projector = FinancialProjector::default();
        let schedule = projector.schedule(&SiteConfiguration::new(10, 4000.0), 100.0);
        for pair in schedule.windows(2) {
            assert!(pair[1].production_ac_kwh < pair[0].production_ac_kwh);
        }
        // Year 15 is the first in which production no longer covers consumption.
        assert_eq!(schedule[14].utility_bill, 0.0);
        assert!(schedule[15].utility_bill > 0.0);
    }

    #[test]
    fn test_project_single_config() {
        let projector = FinancialProjector::default();
        let projection = projector.project(&single_config_catalog(), 10, 100.0).unwrap();

        assert_eq!(projection.panels_count, 10);
        assert_eq!(projection.yearly_energy_dc_kwh, 4000.0);
        assert!((projection.installation_cost - 4515.3).abs() < EPSILON);
        assert!((projection.yearly_energy_coverage - 126.66666666666667).abs() < EPSILON);
        assert_eq!(projection.years_until_break_even, 4);
        assert_eq!(
            projection.lifetime_savings,
            projection.total_cost_without_solar - projection.total_cost_with_solar
        );
        assert!(projection.lifetime_savings > 0.0);
    }

    #[test]
    fn test_project_zero_bill() {
        let projector = FinancialProjector::default();
        let projection = projector.project(&single_config_catalog(), 10, 0.0).unwrap();

        assert_eq!(projection.total_cost_without_solar, 0.0);
        assert_eq!(projection.total_cost_with_solar, projection.installation_cost);
        assert_eq!(projection.lifetime_savings, -projection.installation_cost);
        assert_eq!(projection.years_until_break_even, 25);
        assert!(projection.yearly_energy_coverage.is_infinite());
    }

    #[test]
    fn test_project_not_found() {
        let projector = FinancialProjector::default();
        let result = projector.project(&single_config_catalog(), 11, 100.0);
        assert_eq!(result, Err(ConfigurationNotFound { panels: 11 }));

        let empty = SolarPotentialData::default();
        assert!(projector.project(&empty, 0, 100.0).is_err());
    }

    #[test]
    fn test_incentives_reduce_cost_with_solar() {
        let base = FinancialProjector::default()
            .project(&single_config_catalog(), 10, 100.0)
            .unwrap();
        let projector = FinancialProjector::new(RunParameters {
            solar_incentives: 1000.0,
            ..RunParameters::default()
        })
        .unwrap();
        let subsidized = projector.project(&single_config_catalog(), 10, 100.0).unwrap();

        assert!(
            (base.total_cost_with_solar - subsidized.total_cost_with_solar - 1000.0).abs()
                < EPSILON
        );
        assert_eq!(base.installation_cost, subsidized.installation_cost);
    }

    #[test]
    fn test_deterministic() {
        let projector = FinancialProjector::default();
        let catalog = single_config_catalog();
        let first = projector.project(&catalog, 10, 137.5).unwrap();
        let second = projector.project(&catalog, 10, 137.5).unwrap();
        assert_eq!(
            first.total_cost_with_solar.to_bits(),
            second.total_cost_with_solar.to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = RunParameters {
            installation_lifespan_years: 0,
            ..RunParameters::default()
        };
        assert!(FinancialProjector::new(params).is_err());
    }
}
