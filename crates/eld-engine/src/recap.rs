//! Per-day totals over a finished log, as printed at the bottom of a paper
//! log sheet.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use eld_core::{DutyStatus, secs_to_hours};

use crate::DutyInterval;

/// Totals for one calendar date.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyRecap {
    pub date:                     NaiveDate,
    pub off_duty_secs:            i64,
    pub sleeper_berth_secs:       i64,
    pub driving_secs:             i64,
    pub on_duty_not_driving_secs: i64,
    /// Highest odometer marker logged on this date.
    pub mile_marker:              f64,
    /// Miles covered on this date: this marker minus the previous date's.
    pub miles_driven:             f64,
}

impl DailyRecap {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            off_duty_secs:            0,
            sleeper_berth_secs:       0,
            driving_secs:             0,
            on_duty_not_driving_secs: 0,
            mile_marker:              0.0,
            miles_driven:             0.0,
        }
    }

    pub fn secs_for(&self, status: DutyStatus) -> i64 {
        match status {
            DutyStatus::OffDuty          => self.off_duty_secs,
            DutyStatus::SleeperBerth     => self.sleeper_berth_secs,
            DutyStatus::Driving          => self.driving_secs,
            DutyStatus::OnDutyNotDriving => self.on_duty_not_driving_secs,
        }
    }

    fn slot(&mut self, status: DutyStatus) -> &mut i64 {
        match status {
            DutyStatus::OffDuty          => &mut self.off_duty_secs,
            DutyStatus::SleeperBerth     => &mut self.sleeper_berth_secs,
            DutyStatus::Driving          => &mut self.driving_secs,
            DutyStatus::OnDutyNotDriving => &mut self.on_duty_not_driving_secs,
        }
    }

    /// Driving plus on-duty-not-driving.
    pub fn on_duty_secs(&self) -> i64 {
        self.driving_secs + self.on_duty_not_driving_secs
    }

    /// Every status together.  24 h for a fully logged day.
    pub fn logged_secs(&self) -> i64 {
        DutyStatus::ALL.into_iter().map(|s| self.secs_for(s)).sum()
    }

    pub fn hours_for(&self, status: DutyStatus) -> f64 {
        secs_to_hours(self.secs_for(status))
    }

    pub fn on_duty_hours(&self) -> f64 {
        secs_to_hours(self.on_duty_secs())
    }
}

/// Group rows by date and total them, in date order.
///
/// Rows ending at the end-of-day sentinel count up to midnight.
pub fn summarize_days(intervals: &[DutyInterval]) -> Vec<DailyRecap> {
    let mut days: BTreeMap<NaiveDate, DailyRecap> = BTreeMap::new();
    for interval in intervals {
        let day = days
            .entry(interval.date)
            .or_insert_with(|| DailyRecap::empty(interval.date));
        *day.slot(interval.status) += interval.duration().num_seconds();
        day.mile_marker = day.mile_marker.max(interval.distance_marker_miles);
    }

    let mut previous = 0.0;
    days.into_values()
        .map(|mut day| {
            // A day with only off-duty rows keeps the previous odometer.
            day.mile_marker = day.mile_marker.max(previous);
            day.miles_driven = day.mile_marker - previous;
            previous = day.mile_marker;
            day
        })
        .collect()
}
