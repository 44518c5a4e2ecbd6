use crate::domain::money::Money;
use crate::domain::projection::{FinancialProjection, Recommendation, YearProjection};
use crate::error::{ProjectionError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

const PROJECTION_HEADER: [&str; 9] = [
    "panels",
    "yearly_energy_dc_kwh",
    "yearly_energy_coverage",
    "installation_cost",
    "total_cost_without_solar",
    "total_cost_with_solar",
    "lifetime_savings",
    "years_until_break_even",
    "recommendation",
];

const SCHEDULE_HEADER: [&str; 5] = [
    "year",
    "production_ac_kwh",
    "utility_bill",
    "cost_without_solar",
    "cumulative_savings",
];

#[derive(Serialize)]
struct ProjectionRecord {
    panels: u32,
    yearly_energy_dc_kwh: Option<Decimal>,
    yearly_energy_coverage: Option<Decimal>,
    installation_cost: Option<Money>,
    total_cost_without_solar: Option<Money>,
    total_cost_with_solar: Option<Money>,
    lifetime_savings: Option<Money>,
    years_until_break_even: u32,
    recommendation: Recommendation,
}

impl From<&FinancialProjection> for ProjectionRecord {
    fn from(p: &FinancialProjection) -> Self {
        Self {
            panels: p.panels_count,
            yearly_energy_dc_kwh: quantity(p.yearly_energy_dc_kwh),
            yearly_energy_coverage: quantity(p.yearly_energy_coverage),
            installation_cost: Money::from_f64(p.installation_cost),
            total_cost_without_solar: Money::from_f64(p.total_cost_without_solar),
            total_cost_with_solar: Money::from_f64(p.total_cost_with_solar),
            lifetime_savings: Money::from_f64(p.lifetime_savings),
            years_until_break_even: p.years_until_break_even,
            recommendation: p.recommendation(),
        }
    }
}

#[derive(Serialize)]
struct ScheduleRecord {
    year: u32,
    production_ac_kwh: Option<Decimal>,
    utility_bill: Option<Money>,
    cost_without_solar: Option<Money>,
    cumulative_savings: Option<Money>,
}

impl From<&YearProjection> for ScheduleRecord {
    fn from(y: &YearProjection) -> Self {
        Self {
            // Reported 1-based, matching years_until_break_even.
            year: y.year + 1,
            production_ac_kwh: quantity(y.production_ac_kwh),
            utility_bill: Money::from_f64(y.utility_bill),
            cost_without_solar: Money::from_f64(y.cost_without_solar),
            cumulative_savings: Money::from_f64(y.cumulative_savings),
        }
    }
}

/// Energy and percentage figures, rounded like money. Non-finite values are
/// written as empty fields.
fn quantity(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Writes projection results as CSV.
///
/// Every table starts with its header, even when it has no rows, so an empty
/// result is still a well-formed document.
pub struct ProjectionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ProjectionWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes one summary row per projection.
    pub fn write_projections<'a, I>(&mut self, projections: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a FinancialProjection>,
    {
        self.writer.write_record(PROJECTION_HEADER)?;
        for projection in projections {
            self.writer.serialize(ProjectionRecord::from(projection))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the year-by-year rows of a single configuration.
    pub fn write_schedule(&mut self, schedule: &[YearProjection]) -> Result<()> {
        self.writer.write_record(SCHEDULE_HEADER)?;
        for year in schedule {
            self.writer.serialize(ScheduleRecord::from(year))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ProjectionError::IoError(e.into_error()))
    }
}
