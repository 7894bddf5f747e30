//! Caller-supplied trip description and run options.

use chrono::{DateTime, FixedOffset};
use eld_core::{HosPolicy, Polyline, RouteStep};

use crate::{SimError, SimResult};

// ── SimulationInput ───────────────────────────────────────────────────────────

/// Everything one simulation run needs to know about the trip.
///
/// Labels are opaque and only used to name log rows.  The two leg distances
/// are authoritative: the optional `route_steps` shape the pace along the
/// route, and the optional `path` only places intervals on a map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationInput {
    pub origin_label:              String,
    pub pickup_label:              String,
    pub dropoff_label:             String,
    pub distance_to_pickup_miles:  f64,
    pub distance_to_dropoff_miles: f64,
    /// Time origin of the run.  Day splitting happens at local midnight in
    /// this offset.
    pub start:                     DateTime<FixedOffset>,
    /// On-duty hours already used in the current 70-hour / 8-day cycle.
    pub cycle_hours_at_start:      f64,
    /// Turn-by-turn segments covering both legs, in driving order.  `None`
    /// means constant [`HosPolicy::average_speed_mph`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub route_steps:               Option<Vec<RouteStep>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub path:                      Option<Polyline>,
}

impl SimulationInput {
    pub fn new(
        origin_label:              impl Into<String>,
        pickup_label:              impl Into<String>,
        dropoff_label:             impl Into<String>,
        distance_to_pickup_miles:  f64,
        distance_to_dropoff_miles: f64,
        start:                     DateTime<FixedOffset>,
        cycle_hours_at_start:      f64,
    ) -> Self {
        Self {
            origin_label: origin_label.into(),
            pickup_label: pickup_label.into(),
            dropoff_label: dropoff_label.into(),
            distance_to_pickup_miles,
            distance_to_dropoff_miles,
            start,
            cycle_hours_at_start,
            route_steps: None,
            path: None,
        }
    }

    pub fn with_route_steps(mut self, steps: Vec<RouteStep>) -> Self {
        self.route_steps = Some(steps);
        self
    }

    pub fn with_path(mut self, path: Polyline) -> Self {
        self.path = Some(path);
        self
    }

    #[inline]
    pub fn total_distance_miles(&self) -> f64 {
        self.distance_to_pickup_miles + self.distance_to_dropoff_miles
    }

    /// Reject inputs the engine cannot simulate.  No partial result is ever
    /// produced for an invalid input.
    pub fn validate(&self, policy: &HosPolicy) -> SimResult<()> {
        let distances = [
            ("distance_to_pickup_miles", self.distance_to_pickup_miles),
            ("distance_to_dropoff_miles", self.distance_to_dropoff_miles),
        ];
        for (field, miles) in distances {
            if !miles.is_finite() || miles < 0.0 {
                return Err(SimError::invalid(
                    field,
                    format!("must be a finite, non-negative distance, got {miles}"),
                ));
            }
        }

        let cycle = self.cycle_hours_at_start;
        if !cycle.is_finite() || !(0.0..=policy.max_cycle_hours).contains(&cycle) {
            return Err(SimError::invalid(
                "cycle_hours_at_start",
                format!("must be within [0, {}], got {cycle}", policy.max_cycle_hours),
            ));
        }

        if let Some(steps) = &self.route_steps {
            for (i, step) in steps.iter().enumerate() {
                if !step.distance_miles.is_finite()
                    || !step.duration_hours.is_finite()
                    || step.distance_miles < 0.0
                    || step.duration_hours < 0.0
                {
                    return Err(SimError::invalid(
                        "route_steps",
                        format!("step {i} has a non-finite or negative distance/duration"),
                    ));
                }
                // A step that covers ground in no time would never advance the clock.
                if step.distance_miles > 0.0 && step.duration_hours <= 0.0 {
                    return Err(SimError::invalid(
                        "route_steps",
                        format!("step {i} covers {} mi in zero time", step.distance_miles),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ── SimulationOptions ─────────────────────────────────────────────────────────

/// Knobs that change how a run advances, never what it computes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationOptions {
    /// Upper bound on one driving step, in seconds.  `Some(60)` reproduces a
    /// minute-by-minute simulation; `None` lets each step run to the nearest
    /// limiting clock.
    pub max_step_secs:  Option<i64>,
    /// Fatal [`SimError::IterationLimit`] once the dispatch loop exceeds this.
    pub max_iterations: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            max_step_secs:  None,
            max_iterations: 1_000_000,
        }
    }
}

impl SimulationOptions {
    pub fn minute_stepped() -> Self {
        Self { max_step_secs: Some(60), ..Self::default() }
    }

    pub fn validate(&self) -> SimResult<()> {
        if let Some(step) = self.max_step_secs {
            if step <= 0 {
                return Err(SimError::invalid(
                    "max_step_secs",
                    format!("must be positive, got {step}"),
                ));
            }
        }
        if self.max_iterations == 0 {
            return Err(SimError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}
