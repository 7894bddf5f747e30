//! Trip configuration: a JSON file, command-line flags, or both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use eld_core::HosPolicy;
use eld_route::TripRequest;
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_OUTPUT_DIR: &str = "output/trip_log";

#[derive(Debug, Deserialize)]
pub struct TripConfig {
    pub request:    TripRequest,
    #[serde(default)]
    pub policy:     Option<HosPolicy>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl TripConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the file named by `--config` (if any), then let flags override it.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => {
                let (Some(from), Some(pickup), Some(dropoff)) = (&cli.from, &cli.pickup, &cli.dropoff) else {
                    bail!("either --config or all of --from, --pickup and --dropoff are required");
                };
                Self {
                    request:    TripRequest::new(from, pickup, dropoff),
                    policy:     None,
                    output_dir: None,
                }
            }
        };

        if let Some(from) = &cli.from {
            config.request.current_location = from.clone();
        }
        if let Some(pickup) = &cli.pickup {
            config.request.pickup_location = pickup.clone();
        }
        if let Some(dropoff) = &cli.dropoff {
            config.request.dropoff_location = dropoff.clone();
        }
        if let Some(hours) = cli.cycle_hours {
            config.request.current_cycle_hours = hours;
        }
        if let Some(start) = cli.start {
            config.request.start_time = Some(start);
        }
        if let Some(dir) = &cli.output_dir {
            config.output_dir = Some(dir.clone());
        }
        Ok(config)
    }

    pub fn policy(&self) -> HosPolicy {
        self.policy.clone().unwrap_or_default()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}
