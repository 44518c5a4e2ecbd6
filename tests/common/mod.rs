#![allow(dead_code)]

use rand::Rng;
use rand::seq::SliceRandom;
use solarfin::domain::catalog::{SiteConfiguration, SolarPotentialData};
use std::io::Write;
use tempfile::NamedTempFile;

pub const FIXTURE: &str = "tests/fixtures/building_insights.json";

pub fn catalog(configs: &[(u32, f64)]) -> SolarPotentialData {
    SolarPotentialData::with_configs(
        configs
            .iter()
            .map(|&(panels, kwh)| SiteConfiguration::new(panels, kwh))
            .collect(),
    )
}

/// A shuffled catalog of up to `max_len` configurations with unique panel
/// counts drawn from `0..=max_panels`.
pub fn random_configs<R: Rng>(rng: &mut R, max_len: usize, max_panels: u32) -> Vec<SiteConfiguration> {
    let mut counts: Vec<u32> = (0..=max_panels).collect();
    counts.shuffle(rng);
    let len = rng.gen_range(0..=max_len.min(counts.len()));
    counts
        .into_iter()
        .take(len)
        .map(|panels| {
            let kwh_per_panel = rng.gen_range(150.0..550.0);
            SiteConfiguration::new(panels, panels as f64 * kwh_per_panel)
        })
        .collect()
}

/// Writes a building insights response wrapping `solar_potential`.
pub fn insights_file(solar_potential: serde_json::Value) -> NamedTempFile {
    let body = serde_json::json!({
        "name": "buildings/test",
        "solarPotential": solar_potential,
    });
    json_file(&body)
}

pub fn json_file(body: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{body}").unwrap();
    file
}
