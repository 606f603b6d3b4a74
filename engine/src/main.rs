// Engine main entry point
use std::env;
use std::io;

use anyhow::{bail, Context, Result};
use engine::config::settings::{DashboardSettings, OutputFormat};
use engine::data::csv_parser::CampaignCsvParser;
use engine::data::dataset::CampaignDataset;
use engine::metrics::tables::campaign_rows;
use engine::report::{windowed, write_campaign_table_csv, DashboardReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(csv_path) = args.next() else {
        bail!("usage: campaign-engine <campaign.csv> [settings.json]");
    };

    let settings = match args.next() {
        Some(path) => DashboardSettings::load(&path).with_context(|| format!("loading settings from {path}"))?,
        None => DashboardSettings::default(),
    };
    info!(?settings, "Starting campaign engine");

    let records = CampaignCsvParser::load_campaigns_from_csv(&csv_path)
        .with_context(|| format!("reading campaign sheet {csv_path}"))?;
    let dataset = CampaignDataset::new(records);

    let demographics = match &settings.demographics_path {
        Some(path) => CampaignCsvParser::load_demographics_from_csv(path)
            .with_context(|| format!("reading demographics sheet {}", path.display()))?,
        None => Vec::new(),
    };

    let today = chrono::Local::now().date_naive();
    match settings.output_format {
        OutputFormat::Json => {
            let report = DashboardReport::build(&dataset, &demographics, &settings, today);
            println!("{}", report.to_json()?);
        }
        OutputFormat::Csv => {
            let rows = campaign_rows(windowed(&dataset, &settings, today).records());
            write_campaign_table_csv(&rows, io::stdout().lock())?;
        }
    }

    Ok(())
}
