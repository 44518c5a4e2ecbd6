use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency amount rounded to cents for reporting.
///
/// Projections are computed in `f64`; this wrapper is only the presentation
/// boundary, so rounding never feeds back into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Rounds `value` half away from zero to two decimal places.
    ///
    /// Returns `None` for values with no decimal representation (NaN,
    /// infinities, or magnitudes beyond `Decimal`'s range).
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64_retain(value)
            .map(|d| Self(d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
