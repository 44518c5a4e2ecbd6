use serde::Serialize;
use std::fmt;

/// Headline financial outcome of installing one catalog configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjection {
    pub panels_count: u32,
    pub yearly_energy_dc_kwh: f64,
    /// Year-0 DC production as a percentage of consumption; may exceed 100.
    ///
    /// Infinite for a zero monthly bill, NaN when both production and bill
    /// are zero.
    pub yearly_energy_coverage: f64,
    pub total_cost_without_solar: f64,
    pub total_cost_with_solar: f64,
    pub installation_cost: f64,
    /// 1-based year in which cumulative savings first cover the installation
    /// cost. Equal to the lifespan both when that happens in the final year
    /// and when it never happens within the modeled horizon.
    pub years_until_break_even: u32,
    pub lifetime_savings: f64,
}

impl FinancialProjection {
    pub fn recommendation(&self) -> Recommendation {
        Recommendation::for_projection(self)
    }
}

/// One modeled year of the installation's service life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearProjection {
    /// 0-based year index.
    pub year: u32,
    pub production_ac_kwh: f64,
    /// Discounted grid bill with solar; never negative.
    pub utility_bill: f64,
    pub cost_without_solar: f64,
    pub cumulative_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    NotCostEffective,
    LongTermOnly,
    GoodInvestment,
    ExcellentInvestment,
}

impl Recommendation {
    pub fn for_projection(projection: &FinancialProjection) -> Self {
        if projection.lifetime_savings <= 0.0 {
            Recommendation::NotCostEffective
        } else if projection.years_until_break_even > 15 {
            Recommendation::LongTermOnly
        } else if projection.years_until_break_even > 10 {
            Recommendation::GoodInvestment
        } else {
            Recommendation::ExcellentInvestment
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::NotCostEffective => {
                "This solar installation is not cost-effective. Consider alternatives or wait for more favorable conditions."
            }
            Recommendation::LongTermOnly => {
                "This installation is profitable in the long term, but it takes a significant time to break even. Consider if you'll stay in the property long enough to benefit."
            }
            Recommendation::GoodInvestment => {
                "This installation is a good long-term investment. It will take some time to break even, but the lifetime savings are substantial."
            }
            Recommendation::ExcellentInvestment => {
                "This solar installation is an excellent investment! It offers quick returns and substantial lifetime savings."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::NotCostEffective => "not-cost-effective",
            Recommendation::LongTermOnly => "long-term-only",
            Recommendation::GoodInvestment => "good-investment",
            Recommendation::ExcellentInvestment => "excellent-investment",
        };
        f.write_str(label)
    }
}
