use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Fixed financial and physical assumptions for a deployment.
///
/// The defaults reproduce the reference assumption set. A JSON file may
/// override any subset of the fields, e.g. to model a regional energy price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunParameters {
    /// Grid electricity price per kWh.
    pub energy_cost_per_kwh: f64,
    /// Nominal capacity of one panel in watts, independent of the catalog.
    pub panel_capacity_watts: f64,
    /// Installed system cost per kW of capacity.
    pub cost_per_kw_installed: f64,
    /// Flat amount subtracted from the cost with solar.
    pub solar_incentives: f64,
    pub installation_lifespan_years: u32,
    /// Fraction of DC output available as AC.
    pub dc_to_ac_derate: f64,
    /// Yearly multiplicative panel efficiency retention.
    pub efficiency_depreciation_factor: f64,
    /// Yearly multiplicative growth of the grid energy price.
    pub cost_increase_factor: f64,
    /// Yearly divisor applied to future costs.
    pub discount_rate: f64,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            energy_cost_per_kwh: 0.38,
            panel_capacity_watts: 290.0,
            cost_per_kw_installed: 1557.0,
            solar_incentives: 0.0,
            installation_lifespan_years: 25,
            dc_to_ac_derate: 0.85,
            efficiency_depreciation_factor: 0.995,
            cost_increase_factor: 1.015,
            discount_rate: 1.04,
        }
    }
}

impl RunParameters {
    /// Reads a (possibly partial) parameter set from JSON and validates it.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let params: Self = serde_json::from_reader(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.installation_lifespan_years == 0 {
            return Err(ProjectionError::ValidationError(
                "Installation lifespan must be at least one year".to_string(),
            ));
        }

        let positive = [
            ("energy_cost_per_kwh", self.energy_cost_per_kwh),
            ("discount_rate", self.discount_rate),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProjectionError::ValidationError(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let finite = [
            ("panel_capacity_watts", self.panel_capacity_watts),
            ("cost_per_kw_installed", self.cost_per_kw_installed),
            ("solar_incentives", self.solar_incentives),
            ("dc_to_ac_derate", self.dc_to_ac_derate),
            (
                "efficiency_depreciation_factor",
                self.efficiency_depreciation_factor,
            ),
            ("cost_increase_factor", self.cost_increase_factor),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ProjectionError::ValidationError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        Ok(())
    }
}
