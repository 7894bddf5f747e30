//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `duty_log.parquet`
//! - `daily_recap.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Date32Builder, Float64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::LogWriter;
use crate::{DailyRecapRow, DutyLogRow, OutputResult};

fn log_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("date",        DataType::Date32,  false),
        Field::new("duty_status", DataType::Utf8,    false),
        Field::new("start_time",  DataType::Utf8,    false),
        Field::new("end_time",    DataType::Utf8,    false),
        Field::new("label",       DataType::Utf8,    false),
        Field::new("mile_marker", DataType::Float64, false),
        Field::new("latitude",    DataType::Float64, true),
        Field::new("longitude",   DataType::Float64, true),
    ]))
}

fn recap_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("date",                      DataType::Date32,  false),
        Field::new("off_duty_hours",            DataType::Float64, false),
        Field::new("sleeper_berth_hours",       DataType::Float64, false),
        Field::new("driving_hours",             DataType::Float64, false),
        Field::new("on_duty_not_driving_hours", DataType::Float64, false),
        Field::new("on_duty_hours",             DataType::Float64, false),
        Field::new("mile_marker",               DataType::Float64, false),
        Field::new("miles_driven",              DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Days since 1970-01-01, the Arrow `Date32` encoding.
fn epoch_days(date: NaiveDate) -> i32 {
    // 719_163 = days from 0001-01-01 (CE day 1) to 1970-01-01.
    date.num_days_from_ce() - 719_163
}

/// Writes a duty log to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    log:          Option<ArrowWriter<File>>,
    recap:        Option<ArrowWriter<File>>,
    log_schema:   Arc<Schema>,
    recap_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let log_schema = log_schema();
        let recap_schema = recap_schema();

        let log_file = File::create(dir.join("duty_log.parquet"))?;
        let log = ArrowWriter::try_new(log_file, Arc::clone(&log_schema), Some(snappy_props()))?;

        let recap_file = File::create(dir.join("daily_recap.parquet"))?;
        let recap = ArrowWriter::try_new(recap_file, Arc::clone(&recap_schema), Some(snappy_props()))?;

        Ok(Self {
            log: Some(log),
            recap: Some(recap),
            log_schema,
            recap_schema,
        })
    }
}

impl LogWriter for ParquetWriter {
    fn write_intervals(&mut self, rows: &[DutyLogRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.log.as_mut() else {
            return Ok(());
        };

        let mut dates    = Date32Builder::new();
        let mut statuses = StringBuilder::new();
        let mut starts   = StringBuilder::new();
        let mut ends     = StringBuilder::new();
        let mut labels   = StringBuilder::new();
        let mut markers  = Float64Builder::new();
        let mut lats     = Float64Builder::new();
        let mut lons     = Float64Builder::new();

        for row in rows {
            dates.append_value(epoch_days(row.date));
            statuses.append_value(row.duty_status.as_str());
            starts.append_value(row.start_text());
            ends.append_value(row.end_text());
            labels.append_value(&row.label);
            markers.append_value(row.mile_marker);
            lats.append_option(row.latitude);
            lons.append_option(row.longitude);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.log_schema),
            vec![
                Arc::new(dates.finish()),
                Arc::new(statuses.finish()),
                Arc::new(starts.finish()),
                Arc::new(ends.finish()),
                Arc::new(labels.finish()),
                Arc::new(markers.finish()),
                Arc::new(lats.finish()),
                Arc::new(lons.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_daily_recaps(&mut self, rows: &[DailyRecapRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.recap.as_mut() else {
            return Ok(());
        };

        let mut dates   = Date32Builder::new();
        let mut off     = Float64Builder::new();
        let mut sleeper = Float64Builder::new();
        let mut driving = Float64Builder::new();
        let mut on_nd   = Float64Builder::new();
        let mut on_duty = Float64Builder::new();
        let mut markers = Float64Builder::new();
        let mut miles   = Float64Builder::new();

        for row in rows {
            dates.append_value(epoch_days(row.date));
            off.append_value(row.off_duty_hours);
            sleeper.append_value(row.sleeper_berth_hours);
            driving.append_value(row.driving_hours);
            on_nd.append_value(row.on_duty_not_driving_hours);
            on_duty.append_value(row.on_duty_hours);
            markers.append_value(row.mile_marker);
            miles.append_value(row.miles_driven);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.recap_schema),
            vec![
                Arc::new(dates.finish()),
                Arc::new(off.finish()),
                Arc::new(sleeper.finish()),
                Arc::new(driving.finish()),
                Arc::new(on_nd.finish()),
                Arc::new(on_duty.finish()),
                Arc::new(markers.finish()),
                Arc::new(miles.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.log.take() {
            w.close()?;
        }
        if let Some(w) = self.recap.take() {
            w.close()?;
        }
        Ok(())
    }
}
