use clap::Parser;
use miette::{IntoDiagnostic, Result};
use solarfin::application::advisor::{Advisor, Assessment};
use solarfin::application::projector::FinancialProjector;
use solarfin::domain::parameters::RunParameters;
use solarfin::domain::ports::{CatalogSourceBox, Location};
use solarfin::infrastructure::file::FileCatalogSource;
use solarfin::interfaces::csv::projection_writer::ProjectionWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Saved building insights response (JSON)
    input: PathBuf,

    /// Monthly average energy bill
    #[arg(long, default_value_t = 100.0)]
    bill: f64,

    /// Number of panels to project. Defaults to the smallest of 4 and the
    /// largest available configuration.
    #[arg(long)]
    panels: Option<u32>,

    /// JSON file overriding the default run parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Project every available configuration
    #[arg(long, conflicts_with_all = ["panels", "schedule"])]
    sweep: bool,

    /// Print the year-by-year schedule instead of the summary
    #[arg(long)]
    schedule: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            RunParameters::from_reader(file).into_diagnostic()?
        }
        None => RunParameters::default(),
    };
    let projector = FinancialProjector::new(params).into_diagnostic()?;

    // A saved response describes one building, so the location is irrelevant.
    let source: CatalogSourceBox = Box::new(FileCatalogSource::new(&cli.input));
    let advisor = Advisor::load(source.as_ref(), Location::new(0.0, 0.0), projector)
        .await
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ProjectionWriter::new(stdout.lock());

    if cli.sweep {
        let projections = advisor.sweep(cli.bill).into_diagnostic()?;
        if projections.is_empty() {
            eprintln!("WARNING: No valid panel configurations found.");
        }
        writer.write_projections(&projections).into_diagnostic()?;
        return Ok(());
    }

    let requested = cli.panels.or_else(|| advisor.initial_panels()).unwrap_or(0);
    let panels = advisor.clamp_panels(requested);
    if panels != requested {
        eprintln!("WARNING: {requested} panels is outside the available range, using {panels}.");
    }

    match advisor.evaluate(panels, cli.bill).into_diagnostic()? {
        Assessment::Projected(projection) => {
            if cli.schedule {
                if let Some(config) = advisor.catalog().config_for(panels) {
                    let schedule = advisor.projector().schedule(config, cli.bill);
                    writer.write_schedule(&schedule).into_diagnostic()?;
                }
            } else {
                writer.write_projections([&projection]).into_diagnostic()?;
                eprintln!("{}", projection.recommendation().message());
            }
        }
        Assessment::Suggested(nearest) => {
            eprintln!("WARNING: {nearest}");
            writer.write_projections(std::iter::empty()).into_diagnostic()?;
        }
    }

    Ok(())
}
