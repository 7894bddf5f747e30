//! Trip planning: request → resolved legs → simulation input → report.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::info;

use eld_core::{HosPolicy, Polyline};
use eld_engine::{
    DailyRecap, DutyInterval, NoopObserver, SimulationBuilder, SimulationInput,
    SimulationObserver, summarize_days,
};

use crate::{Gazetteer, RouteError, RouteLeg, RouteProvider, RouteResult};

// ── TripRequest ───────────────────────────────────────────────────────────────

/// A dispatcher's trip request: three place names, the cycle hours already
/// used, and an optional start instant (now when absent).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    pub current_location:    String,
    pub pickup_location:     String,
    pub dropoff_location:    String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_cycle_hours: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time:          Option<DateTime<FixedOffset>>,
}

impl TripRequest {
    pub fn new(
        current_location: impl Into<String>,
        pickup_location:  impl Into<String>,
        dropoff_location: impl Into<String>,
    ) -> Self {
        Self {
            current_location:    current_location.into(),
            pickup_location:     pickup_location.into(),
            dropoff_location:    dropoff_location.into(),
            current_cycle_hours: 0.0,
            start_time:          None,
        }
    }

    pub fn cycle_hours(mut self, hours: f64) -> Self {
        self.current_cycle_hours = hours;
        self
    }

    pub fn start_time(mut self, start: DateTime<FixedOffset>) -> Self {
        self.start_time = Some(start);
        self
    }

    fn check_locations(&self) -> RouteResult<()> {
        let fields = [
            ("current_location", &self.current_location),
            ("pickup_location", &self.pickup_location),
            ("dropoff_location", &self.dropoff_location),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(RouteError::InvalidRequest(format!("{name} is required")));
            }
        }
        Ok(())
    }
}

// ── TripPlanner ───────────────────────────────────────────────────────────────

/// Resolves a [`TripRequest`] into a [`TripPlan`] using a gazetteer and a
/// route provider.
pub struct TripPlanner<P: RouteProvider> {
    gazetteer: Gazetteer,
    provider:  P,
    policy:    HosPolicy,
}

impl<P: RouteProvider> TripPlanner<P> {
    pub fn new(gazetteer: Gazetteer, provider: P) -> Self {
        Self { gazetteer, provider, policy: HosPolicy::default() }
    }

    pub fn with_policy(mut self, policy: HosPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn policy(&self) -> &HosPolicy {
        &self.policy
    }

    /// Resolve the three places, route both legs, and build a validated
    /// simulation input.
    ///
    /// Turn-by-turn steps are used only when both legs supply them;
    /// otherwise the whole trip runs at the average speed.  Leg geometries
    /// are joined into one path for location annotation.
    pub fn plan(&self, request: &TripRequest) -> RouteResult<TripPlan> {
        request.check_locations()?;

        let origin = self.gazetteer.locate(&request.current_location)?;
        let pickup = self.gazetteer.locate(&request.pickup_location)?;
        let dropoff = self.gazetteer.locate(&request.dropoff_location)?;

        let to_pickup = self.provider.route(origin, pickup)?;
        let to_dropoff = self.provider.route(pickup, dropoff)?;

        let start = request.start_time.unwrap_or_else(|| Utc::now().fixed_offset());
        let mut input = SimulationInput::new(
            request.current_location.trim(),
            request.pickup_location.trim(),
            request.dropoff_location.trim(),
            to_pickup.distance_miles,
            to_dropoff.distance_miles,
            start,
            request.current_cycle_hours,
        );

        if to_pickup.has_steps() && to_dropoff.has_steps() {
            let mut steps = to_pickup.normalized_steps();
            steps.extend(to_dropoff.normalized_steps());
            if !steps.is_empty() {
                input = input.with_route_steps(steps);
            }
        }

        let path = join_geometry(&to_pickup.geometry, &to_dropoff.geometry);
        if !path.is_empty() {
            input = input.with_path(path);
        }

        self.policy.validate().map_err(eld_engine::SimError::from)?;
        input.validate(&self.policy)?;

        info!(
            provider = self.provider.name(),
            origin = %request.current_location,
            pickup = %request.pickup_location,
            dropoff = %request.dropoff_location,
            miles = input.total_distance_miles(),
            "trip planned"
        );

        Ok(TripPlan {
            estimated_duration_hours: self.policy.estimated_hours(input.total_distance_miles()),
            legs: [to_pickup, to_dropoff],
            input,
            policy: self.policy.clone(),
        })
    }
}

fn join_geometry(a: &Polyline, b: &Polyline) -> Polyline {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => a.concat(b),
        (false, true) => a.clone(),
        (true, false) => b.clone(),
        (true, true) => Polyline::default(),
    }
}

// ── TripPlan ──────────────────────────────────────────────────────────────────

/// A planned, not yet simulated, trip.
#[derive(Clone, Debug)]
pub struct TripPlan {
    /// `[origin → pickup, pickup → dropoff]`.
    pub legs:                     [RouteLeg; 2],
    pub input:                    SimulationInput,
    pub policy:                   HosPolicy,
    /// Total distance at the policy's average speed, ignoring stops.
    pub estimated_duration_hours: f64,
}

impl TripPlan {
    pub fn total_distance_miles(&self) -> f64 {
        self.input.total_distance_miles()
    }

    pub fn simulate(&self) -> RouteResult<TripReport> {
        self.simulate_with_observer(&mut NoopObserver)
    }

    /// Simulate and collect the report, forwarding engine callbacks to
    /// `observer`.
    pub fn simulate_with_observer<O: SimulationObserver>(&self, observer: &mut O) -> RouteResult<TripReport> {
        let intervals = SimulationBuilder::new(self.input.clone())
            .policy(self.policy.clone())
            .build()?
            .run(observer)?;
        let days = summarize_days(&intervals);
        Ok(TripReport {
            total_distance_miles:     self.total_distance_miles(),
            estimated_duration_hours: self.estimated_duration_hours,
            intervals,
            days,
        })
    }
}

// ── TripReport ────────────────────────────────────────────────────────────────

/// Everything the caller persists or displays for one trip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripReport {
    pub total_distance_miles:     f64,
    pub estimated_duration_hours: f64,
    pub intervals:                Vec<DutyInterval>,
    pub days:                     Vec<DailyRecap>,
}

impl TripReport {
    /// Wall-clock span from the first row's start to the dropoff's end.
    pub fn elapsed_hours(&self) -> f64 {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => {
                (last.end_datetime() - first.start_datetime()).num_seconds() as f64 / 3_600.0
            }
            _ => 0.0,
        }
    }
}
