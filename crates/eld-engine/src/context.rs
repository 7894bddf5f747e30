//! Read-only data shared by the trigger evaluator and the applicator.

use eld_core::HosPolicy;

use crate::{Pace, SimulationInput, SimulationOptions};

/// Where the trip stands relative to its two service stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TripPhase {
    /// Driving towards the pickup; pickup not yet serviced.
    PrePickup,
    /// Pickup serviced; driving towards the dropoff.
    PostPickup,
    /// Distance covered; only end-of-trip bookkeeping remains.
    Dropoff,
    Done,
}

/// Immutable view of one run's inputs.
///
/// Cheap to copy: every field is a borrow.
#[derive(Copy, Clone, Debug)]
pub struct TripContext<'a> {
    pub input:   &'a SimulationInput,
    pub policy:  &'a HosPolicy,
    pub pace:    &'a Pace,
    pub options: &'a SimulationOptions,
}

impl<'a> TripContext<'a> {
    pub fn new(
        input:   &'a SimulationInput,
        policy:  &'a HosPolicy,
        pace:    &'a Pace,
        options: &'a SimulationOptions,
    ) -> Self {
        Self { input, policy, pace, options }
    }

    #[inline]
    pub fn total_distance(&self) -> f64 {
        self.input.total_distance_miles()
    }

    /// Label of a driving row in the given phase.
    pub fn drive_label(&self, phase: TripPhase) -> String {
        match phase {
            TripPhase::PrePickup => format!("Driving to {}", self.input.pickup_label),
            _ => format!("Driving to {}", self.input.dropoff_label),
        }
    }
}
