//! `LogOutputObserver<W>` — bridges `SimulationObserver` to a `LogWriter`.

use eld_engine::{ClockState, DutyInterval, SimulationObserver, summarize_days};
use tracing::{info, warn};

use crate::row::{log_rows, recap_rows};
use crate::writer::LogWriter;
use crate::{OutputError, OutputResult};

/// A [`SimulationObserver`] that writes the finished duty log and its daily
/// recap to any [`LogWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Rows are written once the run finishes, in sorted log order.  Errors from
/// the writer are stored internally because observer methods have no return
/// value; check them with [`take_error`][Self::take_error] after the run.
pub struct LogOutputObserver<W: LogWriter> {
    writer:     W,
    streamed:   usize,
    dropped:    usize,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: LogWriter> LogOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            streamed:   0,
            dropped:    0,
            written:    0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows the emitter accepted during the run.
    pub fn intervals_seen(&self) -> usize {
        self.streamed
    }

    /// Rows the emitter rejected as overlapping.
    pub fn intervals_dropped(&self) -> usize {
        self.dropped
    }

    /// Duty-log rows handed to the writer.
    pub fn rows_written(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_all(&mut self, intervals: &[DutyInterval]) -> OutputResult<()> {
        self.writer.write_intervals(&log_rows(intervals))?;
        self.written = intervals.len();
        self.writer.write_daily_recaps(&recap_rows(&summarize_days(intervals)))?;
        Ok(())
    }
}

impl<W: LogWriter> SimulationObserver for LogOutputObserver<W> {
    fn on_interval(&mut self, _interval: &DutyInterval) {
        self.streamed += 1;
    }

    fn on_dropped(&mut self, _interval: &DutyInterval) {
        self.dropped += 1;
    }

    fn on_finish(&mut self, _clock: &ClockState, intervals: &[DutyInterval]) {
        let result = self.write_all(intervals);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);

        match &self.last_error {
            None => info!(rows = self.written, dropped = self.dropped, "duty log written"),
            Some(e) => warn!(error = %e, "duty log write failed"),
        }
    }
}
