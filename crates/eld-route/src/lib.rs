//! `eld-route` — everything between a dispatcher's trip request and the
//! simulation engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`provider`]    | `RouteProvider`, `RouteLeg`, `StraightLineRouter`, `FallbackRouter` |
//! | [`gazetteer`]   | `Gazetteer`: name lookup + R-tree nearest place         |
//! | [`cities`]      | `US_CITIES`: the built-in city table                    |
//! | [`planner`]     | `TripRequest`, `TripPlanner`, `TripPlan`, `TripReport`   |
//! | [`error`]       | `RouteError`, `RouteResult`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use eld_route::{Gazetteer, StraightLineRouter, TripPlanner, TripRequest};
//!
//! let planner = TripPlanner::new(Gazetteer::us_cities(), StraightLineRouter::default());
//! let report = planner
//!     .plan(&TripRequest::new("Chicago, IL", "St. Louis, MO", "Denver, CO").cycle_hours(12.0))?
//!     .simulate()?;
//! println!("{} rows over {} days", report.intervals.len(), report.days.len());
//! ```

pub mod cities;
pub mod error;
pub mod gazetteer;
pub mod planner;
pub mod provider;


pub use error::{RouteError, RouteResult};
pub use gazetteer::{Gazetteer, Place};
pub use planner::{TripPlan, TripPlanner, TripReport, TripRequest};
pub use provider::{FallbackRouter, RouteLeg, RouteProvider, StraightLineRouter};
