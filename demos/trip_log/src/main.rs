//! trip_log — plan a property-carrying trip and write its ELD duty log.
//!
//! Resolves the three locations against the built-in city table, routes both
//! legs with the straight-line router, runs the Hours-of-Service simulation,
//! and writes `duty_log.csv` / `daily_recap.csv` to the output directory.
//!
//! ```text
//! cargo run -p trip_log -- --config demos/trip_log/trip.json
//! cargo run -p trip_log -- --from "Chicago, IL" --pickup "St. Louis, MO" \
//!     --dropoff "Denver, CO" --cycle-hours 12.5
//! ```
//!
//! Set `RUST_LOG=debug` to see every applied event.

mod cli;
mod config;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use eld_output::{CsvWriter, LogOutputObserver};
use eld_route::{Gazetteer, StraightLineRouter, TripPlanner, TripReport};

use cli::Cli;
use config::TripConfig;

/// Haversine miles are stretched by this factor to approximate road miles.
const ROAD_COEFFICIENT: f64 = 1.3;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = TripConfig::resolve(&cli)?;
    let policy = config.policy();

    // 1. Plan.
    let router = StraightLineRouter::new(ROAD_COEFFICIENT, policy.average_speed_mph);
    let planner = TripPlanner::new(Gazetteer::us_cities(), router).with_policy(policy);
    let plan = planner.plan(&config.request)?;

    // 2. Output.
    let output_dir = config.output_dir();
    std::fs::create_dir_all(&output_dir)?;
    info!(dir = %output_dir.display(), "writing duty log");
    let mut obs = LogOutputObserver::new(CsvWriter::new(&output_dir)?);

    // 3. Simulate.
    let t0 = Instant::now();
    let report = plan.simulate_with_observer(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== trip_log ===");
    println!(
        "{} → {} → {}",
        plan.input.origin_label, plan.input.pickup_label, plan.input.dropoff_label
    );
    println!(
        "Distance: {:.1} mi  |  Driving estimate: {:.1} h  |  Elapsed on log: {:.1} h",
        report.total_distance_miles,
        report.estimated_duration_hours,
        report.elapsed_hours()
    );
    println!("Simulated in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    println!(
        "  {}/duty_log.csv    : {} rows",
        output_dir.display(),
        obs.rows_written()
    );
    println!(
        "  {}/daily_recap.csv : {} rows",
        output_dir.display(),
        report.days.len()
    );
    println!();

    print_log(&report);
    println!();
    print_recap(&report);

    Ok(())
}

fn print_log(report: &TripReport) {
    println!(
        "{:<10} {:<8} {:<8} {:<20} {:>9}  {}",
        "Date", "Start", "End", "Status", "Mile", "Label"
    );
    println!("{}", "-".repeat(90));
    for iv in &report.intervals {
        println!(
            "{:<10} {:<8} {:<8} {:<20} {:>9.1}  {}",
            iv.date.format("%Y-%m-%d").to_string(),
            iv.start_time.format("%H:%M:%S").to_string(),
            iv.end_time.format("%H:%M:%S").to_string(),
            iv.status.as_str(),
            iv.distance_marker_miles,
            iv.label,
        );
    }
}

fn print_recap(report: &TripReport) {
    println!(
        "{:<10} {:>6} {:>6} {:>6} {:>6} {:>9} {:>9}",
        "Date", "Off", "SB", "D", "ON", "Mile", "Miles"
    );
    println!("{}", "-".repeat(60));
    for day in &report.days {
        println!(
            "{:<10} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>9.1} {:>9.1}",
            day.date.format("%Y-%m-%d").to_string(),
            day.hours_for(eld_core::DutyStatus::OffDuty),
            day.hours_for(eld_core::DutyStatus::SleeperBerth),
            day.hours_for(eld_core::DutyStatus::Driving),
            day.hours_for(eld_core::DutyStatus::OnDutyNotDriving),
            day.mile_marker,
            day.miles_driven,
        );
    }
}
