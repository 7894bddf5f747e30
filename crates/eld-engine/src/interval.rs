//! Draft and final interval types.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use eld_core::{DutyStatus, END_OF_DAY, GeoPoint, MIDNIGHT};

/// One event's span before buffering and day splitting.
///
/// A multi-day rest is still a single draft.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub start:       DateTime<FixedOffset>,
    pub end:         DateTime<FixedOffset>,
    pub status:      DutyStatus,
    pub label:       String,
    pub start_miles: f64,
    pub end_miles:   f64,
}

impl Draft {
    #[inline]
    pub fn secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// One row of the duty-status log.  Never spans midnight.
///
/// A piece that ends at midnight carries [`END_OF_DAY`] as its end time; the
/// next piece starts at [`MIDNIGHT`] of the following date.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyInterval {
    pub date:                  NaiveDate,
    pub start_time:            NaiveTime,
    pub end_time:              NaiveTime,
    pub status:                DutyStatus,
    pub label:                 String,
    /// Odometer at the end of a driving row, or at the stationary event.
    pub distance_marker_miles: f64,
    pub position:              Option<GeoPoint>,
}

impl DutyInterval {
    /// Local start instant.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Local end instant, with [`END_OF_DAY`] read as the following midnight.
    pub fn end_datetime(&self) -> NaiveDateTime {
        if self.end_time == END_OF_DAY {
            let midnight = self.date.and_time(MIDNIGHT);
            midnight
                .checked_add_signed(TimeDelta::days(1))
                .unwrap_or_else(|| self.date.and_time(END_OF_DAY))
        } else {
            self.date.and_time(self.end_time)
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_datetime() - self.start_datetime()
    }

    /// `true` when the two rows share a date and their spans intersect.
    pub fn overlaps(&self, other: &DutyInterval) -> bool {
        self.date == other.date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}
