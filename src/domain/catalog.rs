use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Lifetime assumed when the provider omits `panelLifetimeYears`.
pub const DEFAULT_PANEL_LIFETIME_YEARS: u32 = 20;

/// Panel count the explorer starts from, capped by the largest array.
pub const INITIAL_PANELS: u32 = 4;

/// One discrete array layout supported by the site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfiguration {
    pub panels_count: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub yearly_energy_dc_kwh: f64,
}

impl SiteConfiguration {
    pub fn new(panels_count: u32, yearly_energy_dc_kwh: f64) -> Self {
        Self {
            panels_count,
            yearly_energy_dc_kwh,
        }
    }
}

/// Solar potential of a single building as reported by the site data provider.
///
/// Missing or null fields are normalized the same way for every provider
/// response: numbers default to zero, the configuration list to empty and the
/// panel lifetime to [`DEFAULT_PANEL_LIFETIME_YEARS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolarPotentialData {
    #[serde(deserialize_with = "nullable")]
    pub max_array_panels_count: u32,
    #[serde(deserialize_with = "nullable")]
    pub max_array_area_meters2: f64,
    #[serde(deserialize_with = "nullable")]
    pub max_sunshine_hours_per_year: f64,
    #[serde(deserialize_with = "nullable")]
    pub carbon_offset_factor_kg_per_mwh: f64,
    #[serde(deserialize_with = "nullable")]
    pub panel_capacity_watts: f64,
    #[serde(deserialize_with = "nullable")]
    pub panel_height_meters: f64,
    #[serde(deserialize_with = "nullable")]
    pub panel_width_meters: f64,
    #[serde(deserialize_with = "lifetime_or_default")]
    pub panel_lifetime_years: u32,
    #[serde(deserialize_with = "nullable")]
    pub solar_panel_configs: Vec<SiteConfiguration>,
}

impl Default for SolarPotentialData {
    fn default() -> Self {
        Self {
            max_array_panels_count: 0,
            max_array_area_meters2: 0.0,
            max_sunshine_hours_per_year: 0.0,
            carbon_offset_factor_kg_per_mwh: 0.0,
            panel_capacity_watts: 0.0,
            panel_height_meters: 0.0,
            panel_width_meters: 0.0,
            panel_lifetime_years: DEFAULT_PANEL_LIFETIME_YEARS,
            solar_panel_configs: Vec::new(),
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lifetime_or_default<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u32>::deserialize(deserializer)? {
        Some(0) | None => Ok(DEFAULT_PANEL_LIFETIME_YEARS),
        Some(years) => Ok(years),
    }
}

impl SolarPotentialData {
    pub fn with_configs(solar_panel_configs: Vec<SiteConfiguration>) -> Self {
        Self {
            solar_panel_configs,
            ..Self::default()
        }
    }

    /// Checks the invariants the projector relies on.
    ///
    /// Panel counts must be unique and every energy figure finite and
    /// non-negative. An empty configuration list is valid.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.solar_panel_configs.len());
        for config in &self.solar_panel_configs {
            if !seen.insert(config.panels_count) {
                return Err(ProjectionError::ValidationError(format!(
                    "Duplicate configuration for {} panels",
                    config.panels_count
                )));
            }
            if !config.yearly_energy_dc_kwh.is_finite() || config.yearly_energy_dc_kwh < 0.0 {
                return Err(ProjectionError::ValidationError(format!(
                    "Invalid yearly energy for {} panels: {}",
                    config.panels_count, config.yearly_energy_dc_kwh
                )));
            }
        }
        Ok(())
    }

    /// Finds the configuration with exactly `panels` panels.
    pub fn config_for(&self, panels: u32) -> Option<&SiteConfiguration> {
        self.solar_panel_configs
            .iter()
            .find(|config| config.panels_count == panels)
    }

    /// Smallest and largest available panel counts.
    pub fn panel_range(&self) -> Option<(u32, u32)> {
        let counts = self.solar_panel_configs.iter().map(|c| c.panels_count);
        let min = counts.clone().min()?;
        let max = counts.max()?;
        Some((min, max))
    }

    pub fn initial_panels(&self) -> Option<u32> {
        self.panel_range().map(|(_, max)| INITIAL_PANELS.min(max))
    }
}

/// Envelope of the provider's building insights response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInsights {
    #[serde(default)]
    pub solar_potential: Option<SolarPotentialData>,
}
