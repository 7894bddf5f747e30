//! Distance ↔ time conversion along the route.
//!
//! Route steps give a piecewise-constant pace.  Beyond the last step (or
//! when no steps are supplied at all) the policy's average speed applies.

use eld_core::RouteStep;
use eld_core::time::SECS_PER_HOUR;

#[derive(Copy, Clone, Debug, PartialEq)]
struct PaceSegment {
    start_mile:     f64,
    end_mile:       f64,
    secs_per_mile:  f64,
}

/// Piecewise-constant pace over the trip odometer.
#[derive(Clone, Debug, PartialEq)]
pub struct Pace {
    /// Ordered, contiguous, non-empty segments starting at mile 0.
    segments:               Vec<PaceSegment>,
    fallback_secs_per_mile: f64,
}

impl Pace {
    /// Constant speed everywhere.
    pub fn constant(speed_mph: f64) -> Self {
        Self {
            segments:               Vec::new(),
            fallback_secs_per_mile: SECS_PER_HOUR as f64 / speed_mph,
        }
    }

    /// Pace from turn-by-turn steps.  Zero-length steps are ignored.
    ///
    /// Callers must have validated the steps: every step with positive
    /// distance has positive duration.
    pub fn from_steps(steps: &[RouteStep], fallback_speed_mph: f64) -> Self {
        let mut pace = Self::constant(fallback_speed_mph);
        let mut mile = 0.0;
        for step in steps.iter().filter(|s| s.distance_miles > 0.0) {
            let end = mile + step.distance_miles;
            pace.segments.push(PaceSegment {
                start_mile:    mile,
                end_mile:      end,
                secs_per_mile: step.duration_hours * SECS_PER_HOUR as f64 / step.distance_miles,
            });
            mile = end;
        }
        pace
    }

    /// `(end_mile, secs_per_mile)` of the segment containing `mile`.
    fn segment_at(&self, mile: f64) -> (f64, f64) {
        let idx = self.segments.partition_point(|s| s.end_mile <= mile);
        match self.segments.get(idx) {
            Some(s) => (s.end_mile, s.secs_per_mile),
            None => (f64::INFINITY, self.fallback_secs_per_mile),
        }
    }

    /// Driving seconds needed to go from odometer `from` to `to`.
    pub fn secs_between(&self, from: f64, to: f64) -> f64 {
        let mut secs = 0.0;
        let mut mile = from;
        while mile < to {
            let (end, secs_per_mile) = self.segment_at(mile);
            let stop = end.min(to);
            secs += (stop - mile) * secs_per_mile;
            mile = stop;
        }
        secs
    }

    /// Odometer reached after driving `secs` seconds from `from`.
    pub fn miles_after(&self, from: f64, secs: f64) -> f64 {
        let mut left = secs;
        let mut mile = from;
        while left > 0.0 {
            let (end, secs_per_mile) = self.segment_at(mile);
            let needed = (end - mile) * secs_per_mile;
            if needed >= left {
                return mile + left / secs_per_mile;
            }
            left -= needed;
            mile = end;
        }
        mile
    }
}
