use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::warn;

use hotel_visitors::dashboard::{render_json, render_text};
use hotel_visitors::dataset::DEFAULT_DATASET_FILE;
use hotel_visitors::utils::{setup_logging, validate_args};
use hotel_visitors::{
    dates, init_default_dataset, load_dataset, Args, Dashboard, DateRange, FilterRequest,
    OutputFormat,
};

/// An unparseable date leaves that side of the range unset.
fn parse_bound(text: Option<&str>) -> Option<chrono::NaiveDate> {
    let text = text?;
    match dates::parse_date(text) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(action = "parse", component = "date_argument", error = %e, "Ignoring date argument");
            eprintln!("Warning: {}", e);
            None
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if args.init {
        init_default_dataset(Path::new(DEFAULT_DATASET_FILE))?;
        println!("Created {} with the bundled dataset", DEFAULT_DATASET_FILE);
        return Ok(());
    }

    let dataset = load_dataset(args.data.as_deref()).context("Failed to load booking dataset")?;
    let mut dashboard = Dashboard::new(dataset);

    // An unparseable date still counts as a filter attempt
    if args.start.is_some() || args.end.is_some() {
        let range = DateRange {
            start: parse_bound(args.start.as_deref()),
            end: parse_bound(args.end.as_deref()),
        };
        dashboard.filter(FilterRequest { range });
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&dashboard, args.top)),
        OutputFormat::Json => {
            println!("{}", render_json(&dashboard).context("Failed to encode output")?)
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
