//! Location-name ↔ coordinate lookup.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest named place.
//! Distances inside the tree are squared degrees, which ranks neighbours
//! well enough at continental scale; the returned place is exact.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use eld_core::GeoPoint;

use crate::cities::US_CITIES;
use crate::{RouteError, RouteResult};

// ── Place ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub name:  String,
    pub point: GeoPoint,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct PlaceEntry {
    point: [f64; 2], // [lat, lon]
    idx:   usize,
}

impl RTreeObject for PlaceEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PlaceEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Gazetteer ─────────────────────────────────────────────────────────────────

/// Named places with case-insensitive lookup and nearest-place search.
pub struct Gazetteer {
    places:  Vec<Place>,
    /// Lowercased, whitespace-trimmed name → index into `places`.
    by_name: FxHashMap<String, usize>,
    index:   RTree<PlaceEntry>,
}

impl Gazetteer {
    /// Build from `(name, point)` pairs.  A repeated name keeps its last point.
    pub fn from_places(places: impl IntoIterator<Item = Place>) -> Self {
        let mut unique: Vec<Place> = Vec::new();
        let mut by_name = FxHashMap::default();
        for place in places {
            let key = normalize(&place.name);
            match by_name.get(&key) {
                Some(&idx) => unique[idx] = place,
                None => {
                    by_name.insert(key, unique.len());
                    unique.push(place);
                }
            }
        }

        let entries = unique
            .iter()
            .enumerate()
            .map(|(idx, p)| PlaceEntry { point: [p.point.lat, p.point.lon], idx })
            .collect();

        Self {
            places: unique,
            by_name,
            index: RTree::bulk_load(entries),
        }
    }

    /// The built-in US city table.
    pub fn us_cities() -> Self {
        Self::from_places(US_CITIES.iter().map(|&(name, lat, lon)| Place {
            name:  name.to_owned(),
            point: GeoPoint::new(lat, lon),
        }))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn get(&self, name: &str) -> Option<&Place> {
        self.by_name.get(&normalize(name)).map(|&idx| &self.places[idx])
    }

    /// Coordinates of `name`, or [`RouteError::UnknownLocation`].
    pub fn locate(&self, name: &str) -> RouteResult<GeoPoint> {
        self.get(name)
            .map(|p| p.point)
            .ok_or_else(|| RouteError::UnknownLocation(name.to_owned()))
    }

    /// Nearest named place to `point`; `None` only for an empty gazetteer.
    pub fn nearest(&self, point: GeoPoint) -> Option<&Place> {
        self.index
            .nearest_neighbor(&[point.lat, point.lon])
            .map(|entry| &self.places[entry.idx])
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::us_cities()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
