//! Flat row types written by output backends.
//!
//! Dates are ISO `YYYY-MM-DD`; times are `HH:MM:SS`, so a piece ending at
//! the end-of-day sentinel is written as `23:59:59`.

use chrono::{NaiveDate, NaiveTime};
use eld_core::DutyStatus;
use eld_engine::{DailyRecap, DutyInterval};

/// One duty-log line.
#[derive(Debug, Clone, PartialEq)]
pub struct DutyLogRow {
    pub date:        NaiveDate,
    pub duty_status: DutyStatus,
    pub start_time:  NaiveTime,
    pub end_time:    NaiveTime,
    pub label:       String,
    pub mile_marker: f64,
    pub latitude:    Option<f64>,
    pub longitude:   Option<f64>,
}

impl DutyLogRow {
    pub fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_text(&self) -> String {
        self.start_time.format("%H:%M:%S").to_string()
    }

    pub fn end_text(&self) -> String {
        self.end_time.format("%H:%M:%S").to_string()
    }
}

impl From<&DutyInterval> for DutyLogRow {
    fn from(iv: &DutyInterval) -> Self {
        Self {
            date:        iv.date,
            duty_status: iv.status,
            start_time:  iv.start_time,
            end_time:    iv.end_time,
            label:       iv.label.clone(),
            mile_marker: iv.distance_marker_miles,
            latitude:    iv.position.map(|p| p.lat),
            longitude:   iv.position.map(|p| p.lon),
        }
    }
}

/// Per-date totals, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecapRow {
    pub date:                      NaiveDate,
    pub off_duty_hours:            f64,
    pub sleeper_berth_hours:       f64,
    pub driving_hours:             f64,
    pub on_duty_not_driving_hours: f64,
    pub on_duty_hours:             f64,
    pub mile_marker:               f64,
    pub miles_driven:              f64,
}

impl From<&DailyRecap> for DailyRecapRow {
    fn from(day: &DailyRecap) -> Self {
        Self {
            date:                      day.date,
            off_duty_hours:            day.hours_for(DutyStatus::OffDuty),
            sleeper_berth_hours:       day.hours_for(DutyStatus::SleeperBerth),
            driving_hours:             day.hours_for(DutyStatus::Driving),
            on_duty_not_driving_hours: day.hours_for(DutyStatus::OnDutyNotDriving),
            on_duty_hours:             day.on_duty_hours(),
            mile_marker:               day.mile_marker,
            miles_driven:              day.miles_driven,
        }
    }
}

/// Convert a finished log into rows.
pub fn log_rows(intervals: &[DutyInterval]) -> Vec<DutyLogRow> {
    intervals.iter().map(DutyLogRow::from).collect()
}

pub fn recap_rows(days: &[DailyRecap]) -> Vec<DailyRecapRow> {
    days.iter().map(DailyRecapRow::from).collect()
}
