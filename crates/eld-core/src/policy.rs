//! Hours-of-Service policy.
//!
//! `HosPolicy` gathers the property-carrying interstate limits (70-hour /
//! 8-day cycle) and the fixed durations the engine gives to each mandatory
//! event.  It is plain data: the engine reads it, never mutates it.
//!
//! Limits are stated in the units a dispatcher would use (hours, minutes,
//! miles, mph).  The `*_secs` accessors convert to the engine's whole-second
//! clock units.

use crate::time::{hours_to_secs, minutes_to_secs};
use crate::{CoreError, CoreResult};

/// Longest duration any single limit or event may take: one leap year.
/// Keeps every `*_secs` value far inside the range of the simulated clock.
pub const MAX_DURATION_HOURS: f64 = 24.0 * 366.0;

/// Hours-of-Service limits and event durations.
///
/// `HosPolicy::default()` is the standard property-carrying rule set.  With
/// the `serde` feature every field is optional on input, so a JSON file can
/// override a single value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HosPolicy {
    /// Assumed cruising speed when no route steps are supplied.
    pub average_speed_mph: f64,
    /// Cumulative driving allowed inside one duty window.
    pub max_driving_hours_per_window: f64,
    /// Length of the duty window, measured from its first on-duty minute.
    pub max_duty_hours_per_window: f64,
    /// Driving allowed before a 30-minute break is required.
    pub max_driving_hours_before_break: f64,
    /// On-duty budget of the rolling 70-hour / 8-day cycle.
    pub max_cycle_hours: f64,
    /// Distance between mandatory fuel stops.
    pub fueling_interval_miles: f64,
    /// Rest that closes a duty window.
    pub minimum_rest_hours: f64,
    /// Off-duty period that resets the cycle.
    pub restart_hours: f64,
    pub break_minutes: f64,
    pub fuel_stop_minutes: f64,
    pub pickup_hours: f64,
    pub dropoff_hours: f64,
    /// Consecutive driving is logged in rows of at most this length.
    pub driving_flush_minutes: f64,
}

impl Default for HosPolicy {
    fn default() -> Self {
        Self {
            average_speed_mph:              60.0,
            max_driving_hours_per_window:   11.0,
            max_duty_hours_per_window:      14.0,
            max_driving_hours_before_break: 8.0,
            max_cycle_hours:                70.0,
            fueling_interval_miles:         1_000.0,
            minimum_rest_hours:             10.0,
            restart_hours:                  34.0,
            break_minutes:                  30.0,
            fuel_stop_minutes:              15.0,
            pickup_hours:                   1.0,
            dropoff_hours:                  1.0,
            driving_flush_minutes:          60.0,
        }
    }
}

impl HosPolicy {
    /// Reject policies the engine cannot make progress under.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("average_speed_mph", self.average_speed_mph),
            ("max_driving_hours_per_window", self.max_driving_hours_per_window),
            ("max_duty_hours_per_window", self.max_duty_hours_per_window),
            ("max_driving_hours_before_break", self.max_driving_hours_before_break),
            ("max_cycle_hours", self.max_cycle_hours),
            ("fueling_interval_miles", self.fueling_interval_miles),
            ("minimum_rest_hours", self.minimum_rest_hours),
            ("restart_hours", self.restart_hours),
            ("break_minutes", self.break_minutes),
            ("driving_flush_minutes", self.driving_flush_minutes),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("fuel_stop_minutes", self.fuel_stop_minutes),
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        let durations = [
            ("max_driving_hours_per_window", self.max_driving_hours_per_window),
            ("max_duty_hours_per_window", self.max_duty_hours_per_window),
            ("max_driving_hours_before_break", self.max_driving_hours_before_break),
            ("max_cycle_hours", self.max_cycle_hours),
            ("minimum_rest_hours", self.minimum_rest_hours),
            ("restart_hours", self.restart_hours),
            ("break_minutes / 60", self.break_minutes / 60.0),
            ("fuel_stop_minutes / 60", self.fuel_stop_minutes / 60.0),
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
            ("driving_flush_minutes / 60", self.driving_flush_minutes / 60.0),
        ];
        for (name, hours) in durations {
            if hours > MAX_DURATION_HOURS {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} ({hours}) exceeds {MAX_DURATION_HOURS} hours"
                )));
            }
        }

        if self.max_driving_hours_before_break > self.max_driving_hours_per_window {
            return Err(CoreError::InvalidPolicy(
                "break threshold cannot exceed the driving window".to_owned(),
            ));
        }
        if self.max_driving_hours_per_window > self.max_duty_hours_per_window {
            return Err(CoreError::InvalidPolicy(
                "driving window cannot exceed the duty window".to_owned(),
            ));
        }
        if self.max_duty_hours_per_window > self.max_cycle_hours {
            return Err(CoreError::InvalidPolicy(
                "duty window cannot exceed the cycle".to_owned(),
            ));
        }
        let services = [
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
            ("fuel_stop_minutes / 60", self.fuel_stop_minutes / 60.0),
        ];
        for (name, hours) in services {
            if hours > self.max_duty_hours_per_window {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} ({hours}) does not fit inside one duty window"
                )));
            }
        }
        Ok(())
    }

    // ── Clock-unit accessors ──────────────────────────────────────────────

    #[inline]
    pub fn driving_window_secs(&self) -> i64 {
        hours_to_secs(self.max_driving_hours_per_window)
    }

    #[inline]
    pub fn duty_window_secs(&self) -> i64 {
        hours_to_secs(self.max_duty_hours_per_window)
    }

    #[inline]
    pub fn break_threshold_secs(&self) -> i64 {
        hours_to_secs(self.max_driving_hours_before_break)
    }

    #[inline]
    pub fn cycle_secs(&self) -> i64 {
        hours_to_secs(self.max_cycle_hours)
    }

    #[inline]
    pub fn rest_secs(&self) -> i64 {
        hours_to_secs(self.minimum_rest_hours)
    }

    #[inline]
    pub fn restart_secs(&self) -> i64 {
        hours_to_secs(self.restart_hours)
    }

    #[inline]
    pub fn break_secs(&self) -> i64 {
        minutes_to_secs(self.break_minutes)
    }

    #[inline]
    pub fn fuel_stop_secs(&self) -> i64 {
        minutes_to_secs(self.fuel_stop_minutes)
    }

    #[inline]
    pub fn pickup_secs(&self) -> i64 {
        hours_to_secs(self.pickup_hours)
    }

    #[inline]
    pub fn dropoff_secs(&self) -> i64 {
        hours_to_secs(self.dropoff_hours)
    }

    #[inline]
    pub fn driving_flush_secs(&self) -> i64 {
        minutes_to_secs(self.driving_flush_minutes)
    }

    /// Hours needed to cover `miles` at the average speed.
    #[inline]
    pub fn estimated_hours(&self, miles: f64) -> f64 {
        miles / self.average_speed_mph
    }
}
