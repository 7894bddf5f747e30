//! Route-provider trait and the straight-line fallback.
//!
//! # Pluggability
//!
//! The planner asks for legs through the [`RouteProvider`] trait, so an
//! application can plug in a real turn-by-turn service without touching the
//! engine.  [`StraightLineRouter`] needs no network at all, and
//! [`FallbackRouter`] chains a primary provider with a fallback that is used
//! whenever the primary fails.

use eld_core::{GeoPoint, HosPolicy, Polyline, RouteStep};
use tracing::warn;

use crate::RouteResult;

// ── RouteLeg ──────────────────────────────────────────────────────────────────

/// One origin → destination leg as reported by a provider.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    pub distance_miles: f64,
    pub duration_hours: f64,
    /// Turn-by-turn steps in driving order; empty when the provider has none.
    pub steps:          Vec<RouteStep>,
    /// Route geometry; may be empty.
    pub geometry:       Polyline,
}

impl RouteLeg {
    /// `true` when `steps` describe the whole leg.  A zero-length leg needs
    /// no steps.
    pub fn has_steps(&self) -> bool {
        self.distance_miles == 0.0 || !self.steps.is_empty()
    }

    /// Steps rescaled so their distances add up to `distance_miles`.
    ///
    /// Each step keeps its own speed.  Providers often round per-step
    /// distances, so the raw sum drifts from the leg total.
    pub fn normalized_steps(&self) -> Vec<RouteStep> {
        let sum: f64 = self.steps.iter().map(|s| s.distance_miles).sum();
        if sum <= 0.0 {
            return Vec::new();
        }
        let factor = self.distance_miles / sum;
        self.steps
            .iter()
            .map(|s| RouteStep {
                distance_miles: s.distance_miles * factor,
                duration_hours: s.duration_hours * factor,
                description:    s.description.clone(),
            })
            .collect()
    }
}

// ── RouteProvider trait ───────────────────────────────────────────────────────

/// Pluggable routing service.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one planner can serve trips on
/// several threads.
pub trait RouteProvider: Send + Sync {
    /// Short name for log messages.
    fn name(&self) -> &str;

    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteResult<RouteLeg>;
}

impl<P: RouteProvider + ?Sized> RouteProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteResult<RouteLeg> {
        (**self).route(from, to)
    }
}

// ── StraightLineRouter ────────────────────────────────────────────────────────

/// Great-circle distance stretched by a road coefficient.
///
/// Roads are rarely straight: the haversine distance is multiplied by
/// `road_coefficient` (1.3 by default) and driven at `speed_mph`.  The
/// geometry is the two endpoints and there are no steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StraightLineRouter {
    pub road_coefficient: f64,
    pub speed_mph:        f64,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self {
            road_coefficient: 1.3,
            speed_mph:        HosPolicy::default().average_speed_mph,
        }
    }
}

impl StraightLineRouter {
    pub fn new(road_coefficient: f64, speed_mph: f64) -> Self {
        Self { road_coefficient, speed_mph }
    }
}

impl RouteProvider for StraightLineRouter {
    fn name(&self) -> &str {
        "straight-line"
    }

    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteResult<RouteLeg> {
        if !from.is_valid() || !to.is_valid() {
            return Err(crate::RouteError::NoRoute { from, to });
        }
        let distance_miles = from.distance_miles(to) * self.road_coefficient;
        Ok(RouteLeg {
            distance_miles,
            duration_hours: distance_miles / self.speed_mph,
            steps:          Vec::new(),
            geometry:       Polyline::new(vec![from, to]),
        })
    }
}

// ── FallbackRouter ────────────────────────────────────────────────────────────

/// Tries `primary`; on any error logs a warning and asks `fallback`.
#[derive(Clone, Debug)]
pub struct FallbackRouter<P, F> {
    pub primary:  P,
    pub fallback: F,
}

impl<P: RouteProvider, F: RouteProvider> FallbackRouter<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: RouteProvider, F: RouteProvider> RouteProvider for FallbackRouter<P, F> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteResult<RouteLeg> {
        match self.primary.route(from, to) {
            Ok(leg) => Ok(leg),
            Err(e) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "routing failed; using fallback"
                );
                self.fallback.route(from, to)
            }
        }
    }
}
