//! `eld-output` — duty-log writers for the eld trip-logging engine.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                |
//! |-----------|-------------|----------------------------------------------|
//! | *(none)*  | CSV         | `duty_log.csv`, `daily_recap.csv`            |
//! | `sqlite`  | SQLite      | `eld.db`                                     |
//! | `parquet` | Parquet     | `duty_log.parquet`, `daily_recap.parquet`    |
//!
//! All backends implement [`LogWriter`] and are driven by
//! [`LogOutputObserver`], which implements `eld_engine::SimulationObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use eld_output::{CsvWriter, LogOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./logs"))?;
//! let mut obs = LogOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::LogOutputObserver;
pub use row::{DailyRecapRow, DutyLogRow};
pub use writer::LogWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
