use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "hotel-visitors",
    about = "Summarize hotel booking visitors per day and per country over a date range",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to a booking dataset (JSON array)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// First arrival date to include (DD/MM/YYYY or YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last arrival date to include (DD/MM/YYYY or YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Number of countries to display
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the bundled dataset to hotel_bookings.json
    #[arg(long)]
    pub init: bool,
}
