use crate::domain::catalog::SiteConfiguration;
use serde::Serialize;
use std::fmt;

/// Closest available panel counts around a requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NearestConfigurations {
    /// Greatest available count strictly below the request.
    pub lower: Option<u32>,
    /// First available count strictly above the request.
    pub higher: Option<u32>,
}

/// Finds the available panel counts surrounding `panels`.
///
/// Only meaningful after an exact lookup has failed: a configuration equal to
/// `panels` is reported as neither `lower` nor `higher`. `configs` may be
/// unsorted or empty.
pub fn find_nearest_configurations(
    configs: &[SiteConfiguration],
    panels: u32,
) -> NearestConfigurations {
    let mut counts: Vec<u32> = configs.iter().map(|c| c.panels_count).collect();
    counts.sort_unstable();

    let mut nearest = NearestConfigurations::default();
    for count in counts {
        if count < panels {
            nearest.lower = Some(count);
        } else if count > panels {
            nearest.higher = Some(count);
            break;
        }
    }
    nearest
}

impl fmt::Display for NearestConfigurations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.higher) {
            (None, None) => write!(f, "No valid panel configurations found."),
            (None, Some(higher)) => write!(
                f,
                "The lowest available panel configuration is {higher} panels."
            ),
            (Some(lower), None) => write!(
                f,
                "The highest available panel configuration is {lower} panels."
            ),
            (Some(lower), Some(higher)) => write!(
                f,
                "Nearest configurations: {lower} panels (lower) and {higher} panels (higher)."
            ),
        }
    }
}
