//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `eld.db` file in the configured output directory with
//! two tables: `duty_log` and `daily_recap`.  Re-opening an existing
//! database appends to `duty_log` and replaces recap rows by date.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::LogWriter;
use crate::{DailyRecapRow, DutyLogRow, OutputResult};

/// Writes a duty log to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `eld.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("eld.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS duty_log (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 date        TEXT    NOT NULL,
                 duty_status TEXT    NOT NULL,
                 start_time  TEXT    NOT NULL,
                 end_time    TEXT    NOT NULL,
                 label       TEXT    NOT NULL,
                 mile_marker REAL    NOT NULL,
                 latitude    REAL,
                 longitude   REAL
             );
             CREATE TABLE IF NOT EXISTS daily_recap (
                 date                      TEXT PRIMARY KEY,
                 off_duty_hours            REAL NOT NULL,
                 sleeper_berth_hours       REAL NOT NULL,
                 driving_hours             REAL NOT NULL,
                 on_duty_not_driving_hours REAL NOT NULL,
                 on_duty_hours             REAL NOT NULL,
                 mile_marker               REAL NOT NULL,
                 miles_driven              REAL NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl LogWriter for SqliteWriter {
    fn write_intervals(&mut self, rows: &[DutyLogRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO duty_log \
                 (date, duty_status, start_time, end_time, label, mile_marker, latitude, longitude) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.date_text(),
                    row.duty_status.as_str(),
                    row.start_text(),
                    row.end_text(),
                    row.label,
                    row.mile_marker,
                    row.latitude,
                    row.longitude,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_daily_recaps(&mut self, rows: &[DailyRecapRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO daily_recap \
                 (date, off_duty_hours, sleeper_berth_hours, driving_hours, \
                  on_duty_not_driving_hours, on_duty_hours, mile_marker, miles_driven) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.date.format("%Y-%m-%d").to_string(),
                    row.off_duty_hours,
                    row.sleeper_berth_hours,
                    row.driving_hours,
                    row.on_duty_not_driving_hours,
                    row.on_duty_hours,
                    row.mile_marker,
                    row.miles_driven,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
