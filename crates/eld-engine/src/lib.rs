//! `eld-engine` — Hours-of-Service duty-status simulation.
//!
//! Given a trip's distance profile, a start instant, and the driver's
//! accumulated cycle hours, the engine produces the ordered list of
//! [`DutyInterval`]s an electronic logging device would record.
//!
//! # Pipeline
//!
//! ```text
//! loop while odometer < total distance:
//!   ① Evaluate: trigger::next_event reads the ClockState and picks one
//!                HosEvent in strict precedence order:
//!                  restart > 14 h rest > 11 h close-out/rest > pickup
//!                  > 30 min break > fuel stop > drive
//!   ② Apply:    EventApplicator advances the ClockState and produces one
//!                Draft interval per event
//!   ③ Emit:     IntervalEmitter merges driving drafts, splits at local
//!                midnight, and drops anything overlapping a recorded row
//! then: pickup (if the route ends there), dropoff, sort by (date, start)
//! ```
//!
//! Driving advances in bounded steps: each step runs until the nearest
//! limiting clock or distance target, never minute by minute.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`clock`]     | `ClockState`: the four regulatory clocks plus the cursor  |
//! | [`trigger`]   | `next_event`: the precedence-ordered rule evaluator       |
//! | [`event`]     | `HosEvent`, `RestReason`                                   |
//! | [`apply`]     | `EventApplicator`: event → clock transition + draft       |
//! | [`emitter`]   | `IntervalEmitter`: buffering, midnight split, overlap     |
//! | [`interval`]  | `Draft`, `DutyInterval`                                    |
//! | [`pace`]      | `Pace`: distance ↔ time over route steps                  |
//! | [`input`]     | `SimulationInput`, `SimulationOptions`                     |
//! | [`builder`]   | `SimulationBuilder`                                        |
//! | [`sim`]       | `Simulation`, `simulate`, `simulate_with`                  |
//! | [`observer`]  | `SimulationObserver`, `NoopObserver`                       |
//! | [`recap`]     | `DailyRecap`, `summarize_days`                             |
//! | [`batch`]     | `simulate_batch` (Rayon with the `parallel` feature)       |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `simulate_batch` runs trips on Rayon's thread pool.    |
//! | `serde`    | Serialize/deserialize inputs, intervals, and recaps.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use eld_engine::{SimulationInput, simulate};
//!
//! let input = SimulationInput::new("Chicago, IL", "Chicago, IL", "Denver, CO", 0.0, 1_000.0, start, 12.5);
//! let intervals = simulate(&input)?;
//! ```

pub mod apply;
pub mod batch;
pub mod builder;
pub mod clock;
pub mod context;
pub mod emitter;
pub mod error;
pub mod event;
pub mod input;
pub mod interval;
pub mod observer;
pub mod pace;
pub mod recap;
pub mod sim;
pub mod trigger;

#[cfg(test)]
mod tests;

pub use apply::EventApplicator;
pub use batch::simulate_batch;
pub use builder::SimulationBuilder;
pub use clock::ClockState;
pub use context::{TripContext, TripPhase};
pub use emitter::IntervalEmitter;
pub use error::{SimError, SimResult};
pub use event::{HosEvent, RestReason};
pub use input::{SimulationInput, SimulationOptions};
pub use interval::{Draft, DutyInterval};
pub use observer::{NoopObserver, SimulationObserver};
pub use pace::Pace;
pub use recap::{DailyRecap, summarize_days};
pub use sim::{Simulation, simulate, simulate_with};

/// Odometer tolerance, in miles, when comparing against distance targets.
pub(crate) const DISTANCE_EPSILON: f64 = 1e-6;
