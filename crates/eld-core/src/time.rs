//! Time units shared by the engine.
//!
//! # Design
//!
//! Regulatory clocks are kept as whole **seconds** (`i64`) rather than
//! fractional hours.  Every limit in [`HosPolicy`][crate::HosPolicy] is
//! converted once with [`hours_to_secs`], so threshold comparisons are exact
//! and repeated accumulation never drifts.
//!
//! Calendar-day splitting uses two sentinels: [`MIDNIGHT`] opens a day and
//! [`END_OF_DAY`] (the last representable nanosecond) closes it.

use chrono::NaiveTime;

/// First instant of a calendar day.
pub const MIDNIGHT: NaiveTime = match NaiveTime::from_hms_opt(0, 0, 0) {
    Some(t) => t,
    None => panic!("00:00:00 is a valid time"),
};

/// Last representable instant of a calendar day.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(t) => t,
    None => panic!("23:59:59.999999999 is a valid time"),
};

pub const SECS_PER_HOUR: i64 = 3_600;
pub const SECS_PER_MINUTE: i64 = 60;

/// Convert fractional hours to whole seconds (rounded to the nearest second).
#[inline]
pub fn hours_to_secs(hours: f64) -> i64 {
    (hours * SECS_PER_HOUR as f64).round() as i64
}

/// Convert fractional minutes to whole seconds (rounded to the nearest second).
#[inline]
pub fn minutes_to_secs(minutes: f64) -> i64 {
    (minutes * SECS_PER_MINUTE as f64).round() as i64
}

#[inline]
pub fn secs_to_hours(secs: i64) -> f64 {
    secs as f64 / SECS_PER_HOUR as f64
}
