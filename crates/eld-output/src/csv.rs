//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `duty_log.csv`
//! - `daily_recap.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::LogWriter;
use crate::{DailyRecapRow, DutyLogRow, OutputResult};

pub const DUTY_LOG_HEADER: [&str; 8] = [
    "date", "duty_status", "start_time", "end_time", "label", "mile_marker", "latitude", "longitude",
];

pub const DAILY_RECAP_HEADER: [&str; 8] = [
    "date",
    "off_duty_hours",
    "sleeper_berth_hours",
    "driving_hours",
    "on_duty_not_driving_hours",
    "on_duty_hours",
    "mile_marker",
    "miles_driven",
];

/// Writes a duty log to two CSV files.
pub struct CsvWriter {
    log:      Writer<File>,
    recap:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut log = Writer::from_path(dir.join("duty_log.csv"))?;
        log.write_record(DUTY_LOG_HEADER)?;

        let mut recap = Writer::from_path(dir.join("daily_recap.csv"))?;
        recap.write_record(DAILY_RECAP_HEADER)?;

        Ok(Self { log, recap, finished: false })
    }
}

fn opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_default()
}

impl LogWriter for CsvWriter {
    fn write_intervals(&mut self, rows: &[DutyLogRow]) -> OutputResult<()> {
        for row in rows {
            self.log.write_record(&[
                row.date_text(),
                row.duty_status.as_str().to_owned(),
                row.start_text(),
                row.end_text(),
                row.label.clone(),
                format!("{:.2}", row.mile_marker),
                opt(row.latitude),
                opt(row.longitude),
            ])?;
        }
        Ok(())
    }

    fn write_daily_recaps(&mut self, rows: &[DailyRecapRow]) -> OutputResult<()> {
        for row in rows {
            self.recap.write_record(&[
                row.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", row.off_duty_hours),
                format!("{:.2}", row.sleeper_berth_hours),
                format!("{:.2}", row.driving_hours),
                format!("{:.2}", row.on_duty_not_driving_hours),
                format!("{:.2}", row.on_duty_hours),
                format!("{:.2}", row.mile_marker),
                format!("{:.2}", row.miles_driven),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.log.flush()?;
        self.recap.flush()?;
        Ok(())
    }
}
