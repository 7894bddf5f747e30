//! Geographic coordinate type and route geometry.
//!
//! `GeoPoint` uses `f64` latitude/longitude: trips span thousands of miles
//! and the interpolated positions end up on a map, so single precision is
//! not enough.

/// Mean Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3_958.8;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in statute miles.
    pub fn distance_miles(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_MILES * c
    }

    /// Linear interpolation in lat/lon space.  Adequate between consecutive
    /// polyline vertices, which are at most a few miles apart.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// `true` when both components are finite and inside their valid ranges.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

/// An ordered route geometry with cumulative haversine length per vertex.
///
/// The engine only asks "where is the truck after fraction `f` of the trip",
/// so lookups are by fraction of total length rather than absolute miles.
/// That keeps positions on the line even when the routing provider's
/// reported distance differs from the geometry's own length.
///
/// Only the vertices are serialized; deserializing goes through
/// [`Polyline::new`] so the cumulative lengths always match the points.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "PolylinePoints", into = "PolylinePoints")
)]
pub struct Polyline {
    points: Vec<GeoPoint>,
    /// `cumulative[i]` = haversine miles from `points[0]` to `points[i]`.
    cumulative: Vec<f64>,
}

/// Wire form of a [`Polyline`]: `{"points": [...]}`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PolylinePoints {
    points: Vec<GeoPoint>,
}

#[cfg(feature = "serde")]
impl From<PolylinePoints> for Polyline {
    fn from(wire: PolylinePoints) -> Self {
        Polyline::new(wire.points)
    }
}

#[cfg(feature = "serde")]
impl From<Polyline> for PolylinePoints {
    fn from(line: Polyline) -> Self {
        PolylinePoints { points: line.points }
    }
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance_miles(*p);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Total haversine length in miles.
    pub fn length_miles(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Append `other`, skipping its first vertex when it repeats our last one.
    pub fn concat(&self, other: &Polyline) -> Polyline {
        let mut points = self.points.clone();
        let skip = match (points.last(), other.points.first()) {
            (Some(a), Some(b)) if a == b => 1,
            _ => 0,
        };
        points.extend(other.points.iter().skip(skip).copied());
        Polyline::new(points)
    }

    /// Position after `fraction` (clamped to `[0, 1]`) of the total length.
    ///
    /// Returns `None` for an empty polyline.  A zero-length polyline returns
    /// its first vertex.
    pub fn point_at_fraction(&self, fraction: f64) -> Option<GeoPoint> {
        let first = *self.points.first()?;
        let total = self.length_miles();
        if total <= 0.0 || !fraction.is_finite() {
            return Some(first);
        }
        let target = fraction.clamp(0.0, 1.0) * total;

        // First vertex whose cumulative distance reaches the target.
        let idx = self.cumulative.partition_point(|&c| c < target);
        if idx == 0 {
            return Some(first);
        }
        if idx >= self.points.len() {
            return self.points.last().copied();
        }
        let seg_start = self.cumulative[idx - 1];
        let seg_len = self.cumulative[idx] - seg_start;
        let t = if seg_len > 0.0 { (target - seg_start) / seg_len } else { 0.0 };
        Some(self.points[idx - 1].lerp(self.points[idx], t))
    }
}
