//! The `LogWriter` trait implemented by all backend writers.

use crate::{DailyRecapRow, DutyLogRow, OutputResult};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Errors surfacing through [`LogOutputObserver`][crate::LogOutputObserver]
/// are stored and retrieved with `take_error`.
pub trait LogWriter {
    /// Append duty-log rows, in log order.
    fn write_intervals(&mut self, rows: &[DutyLogRow]) -> OutputResult<()>;

    /// Append per-date recap rows.
    fn write_daily_recaps(&mut self, rows: &[DailyRecapRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
