//! `eld-core` — foundational types for the `eld` trip-logging engine.
//!
//! This crate is a dependency of every other `eld-*` crate.  It intentionally
//! has no `eld-*` dependencies and minimal external ones (only `chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`policy`]   | `HosPolicy`: the Hours-of-Service limits and durations |
//! | [`status`]   | `DutyStatus` enum                                      |
//! | [`geo`]      | `GeoPoint`, `Polyline`, haversine distance             |
//! | [`step`]     | `RouteStep`: one turn-by-turn route segment           |
//! | [`time`]     | second/hour conversions, day-boundary constants        |
//! | [`error`]    | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (JSON policy overrides, reports) |

pub mod error;
pub mod geo;
pub mod policy;
pub mod status;
pub mod step;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, Polyline};
pub use policy::{HosPolicy, MAX_DURATION_HOURS};
pub use status::DutyStatus;
pub use step::RouteStep;
pub use time::{END_OF_DAY, MIDNIGHT, hours_to_secs, secs_to_hours};
