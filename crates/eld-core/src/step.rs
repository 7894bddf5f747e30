//! One segment of a turn-by-turn route.

/// A route segment as reported by the routing provider.
///
/// The engine uses `distance_miles` / `duration_hours` as the pace over that
/// stretch of road; `description` is informational ("Take I-80 W").
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStep {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub description:    String,
}

impl RouteStep {
    pub fn new(distance_miles: f64, duration_hours: f64, description: impl Into<String>) -> Self {
        Self {
            distance_miles,
            duration_hours,
            description: description.into(),
        }
    }

    /// Average speed over the step, or `None` when the step has no duration.
    pub fn speed_mph(&self) -> Option<f64> {
        (self.duration_hours > 0.0).then(|| self.distance_miles / self.duration_hours)
    }
}
