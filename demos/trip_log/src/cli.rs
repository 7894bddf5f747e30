//! Command-line arguments for the trip_log binary.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "trip_log", about = "Plan a property-carrying trip and write its ELD duty log")]
pub struct Cli {
    /// JSON trip config (`request`, optional `policy`, optional `output_dir`)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Where the driver is now
    #[arg(long)]
    pub from: Option<String>,

    /// Pickup location
    #[arg(long)]
    pub pickup: Option<String>,

    /// Dropoff location
    #[arg(long)]
    pub dropoff: Option<String>,

    /// On-duty hours already used in the current 8-day cycle
    #[arg(long)]
    pub cycle_hours: Option<f64>,

    /// Start instant, RFC 3339 (e.g. 2024-03-04T06:00:00-06:00); now if omitted
    #[arg(long)]
    pub start: Option<DateTime<FixedOffset>>,

    /// Directory for duty_log.csv and daily_recap.csv
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Print the trip report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}
