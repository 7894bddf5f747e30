//! The regulatory clock set.
//!
//! # Design
//!
//! All four counters are whole seconds.  Only on-duty time (driving and
//! on-duty-not-driving) accumulates into the cycle and duty-window counters;
//! off-duty and sleeper-berth time only moves `sim_clock`.
//!
//! The 14-hour rule is measured as wall-clock time since `duty_window_start`,
//! so a 30-minute break inside the window still counts against it.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, TimeDelta};
use eld_core::{HosPolicy, hours_to_secs, secs_to_hours};

use crate::{SimError, SimResult, SimulationInput};

/// Simulated instant, odometer, and the four Hours-of-Service counters.
///
/// Owned by exactly one run; mutated only through the `advance_*` and
/// `reset_*` transitions below.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockState {
    pub sim_clock:                DateTime<FixedOffset>,
    pub distance_covered:         f64,
    pub cycle_secs:               i64,
    /// On-duty time logged inside the open duty window.
    pub duty_window_secs:         i64,
    pub driving_window_secs:      i64,
    pub driving_since_break_secs: i64,
    /// Start of the open duty window; `None` between a rest and the next
    /// on-duty minute.
    pub duty_window_start:        Option<DateTime<FixedOffset>>,
    /// Ordinals `k` of fuel markers (`k × fueling_interval_miles`) already
    /// serviced.
    pub fuel_stops_taken:         BTreeSet<u32>,
}

impl ClockState {
    pub fn new(input: &SimulationInput) -> Self {
        Self {
            sim_clock:                input.start,
            distance_covered:         0.0,
            cycle_secs:               hours_to_secs(input.cycle_hours_at_start),
            duty_window_secs:         0,
            driving_window_secs:      0,
            driving_since_break_secs: 0,
            duty_window_start:        None,
            fuel_stops_taken:         BTreeSet::new(),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `secs` of driving covering `miles`.  Opens a duty window if none is open.
    ///
    /// Every `advance_*` fails with [`SimError::ClockOverflow`], leaving the
    /// state untouched, when `sim_clock + secs` is not a representable instant.
    pub fn advance_driving(&mut self, secs: i64, miles: f64) -> SimResult<()> {
        let next = self.clock_after(secs)?;
        self.open_window();
        self.sim_clock = next;
        self.cycle_secs += secs;
        self.duty_window_secs += secs;
        self.driving_window_secs += secs;
        self.driving_since_break_secs += secs;
        self.distance_covered += miles;
        Ok(())
    }

    /// `secs` of on-duty-not-driving work.  Opens a duty window if none is open.
    pub fn advance_on_duty(&mut self, secs: i64) -> SimResult<()> {
        let next = self.clock_after(secs)?;
        self.open_window();
        self.sim_clock = next;
        self.cycle_secs += secs;
        self.duty_window_secs += secs;
        Ok(())
    }

    pub fn advance_off_duty(&mut self, secs: i64) -> SimResult<()> {
        self.sim_clock = self.clock_after(secs)?;
        Ok(())
    }

    pub fn reset_after_break(&mut self) {
        self.driving_since_break_secs = 0;
    }

    pub fn reset_after_duty_window_close(&mut self) {
        self.duty_window_secs = 0;
        self.driving_window_secs = 0;
        self.duty_window_start = None;
    }

    pub fn reset_after_cycle_restart(&mut self) {
        self.cycle_secs = 0;
        self.reset_after_duty_window_close();
    }

    fn clock_after(&self, secs: i64) -> SimResult<DateTime<FixedOffset>> {
        TimeDelta::try_seconds(secs)
            .and_then(|delta| self.sim_clock.checked_add_signed(delta))
            .ok_or(SimError::ClockOverflow { at: self.sim_clock, secs })
    }

    fn open_window(&mut self) {
        if self.duty_window_start.is_none() {
            self.duty_window_start = Some(self.sim_clock);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Wall-clock seconds since the duty window opened, 0 when none is open.
    pub fn window_elapsed_secs(&self) -> i64 {
        self.duty_window_start
            .map_or(0, |start| (self.sim_clock - start).num_seconds())
    }

    pub fn driving_window_left(&self, policy: &HosPolicy) -> i64 {
        (policy.driving_window_secs() - self.driving_window_secs).max(0)
    }

    /// Seconds until the open window closes; a full window when none is open.
    pub fn duty_window_left(&self, policy: &HosPolicy) -> i64 {
        (policy.duty_window_secs() - self.window_elapsed_secs()).max(0)
    }

    pub fn cycle_left(&self, policy: &HosPolicy) -> i64 {
        (policy.cycle_secs() - self.cycle_secs).max(0)
    }

    pub fn break_left(&self, policy: &HosPolicy) -> i64 {
        (policy.break_threshold_secs() - self.driving_since_break_secs).max(0)
    }

    #[inline]
    pub fn is_window_open(&self) -> bool {
        self.duty_window_start.is_some()
    }

    /// Ordinal of the next fuel marker still to be serviced.
    pub fn next_fuel_ordinal(&self) -> u32 {
        self.fuel_stops_taken.last().map_or(1, |k| k + 1)
    }

    pub fn cycle_hours(&self) -> f64 {
        secs_to_hours(self.cycle_secs)
    }

    pub fn duty_window_hours(&self) -> f64 {
        secs_to_hours(self.duty_window_secs)
    }

    pub fn driving_window_hours(&self) -> f64 {
        secs_to_hours(self.driving_window_secs)
    }

    pub fn driving_since_break_hours(&self) -> f64 {
        secs_to_hours(self.driving_since_break_secs)
    }
}
