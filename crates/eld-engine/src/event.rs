//! The closed set of things that can happen next.
//!
//! The trigger evaluator produces exactly one [`HosEvent`] per step and the
//! applicator consumes it in a single `match`.  Adding a rule means adding a
//! variant here, a branch in `trigger`, and an arm in `apply`.

use eld_core::DutyStatus;

use crate::{TripContext, TripPhase};

/// Why a 10-hour rest was taken.  Only changes the row label.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RestReason {
    /// 14 hours elapsed since the duty window opened.
    DutyWindow,
    /// 11 hours of driving in the window.
    DrivingWindow,
    /// The pickup would not fit in the open window.
    BeforePickup,
    /// The fuel stop would not fit in the open window.
    BeforeFuelStop,
    /// The dropoff would not fit in the open window.
    BeforeDropoff,
}

impl RestReason {
    pub fn label(self) -> &'static str {
        match self {
            RestReason::DutyWindow     => "10-hour rest after 14-hour window",
            RestReason::DrivingWindow  => "10-hour rest after 11 hours driving",
            RestReason::BeforePickup   => "10-hour rest before pickup",
            RestReason::BeforeFuelStop => "10-hour rest before fuel stop",
            RestReason::BeforeDropoff  => "10-hour rest before dropoff",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HosEvent {
    /// 34-hour off-duty cycle restart.
    Restart,
    /// 10-hour sleeper-berth rest closing the duty window.
    Rest(RestReason),
    /// On-duty-not-driving time up to the end of the duty window after the
    /// driving window is used up.
    CloseWindow { secs: i64 },
    Pickup,
    /// 30-minute off-duty break.
    Break,
    /// Fuel stop at marker `ordinal × fueling_interval_miles`.
    FuelStop { ordinal: u32 },
    /// Drive for `secs`, ending at odometer `to_miles`.
    Drive { secs: i64, to_miles: f64 },
    Dropoff,
}

impl HosEvent {
    pub fn status(&self) -> DutyStatus {
        match self {
            HosEvent::Restart | HosEvent::Break => DutyStatus::OffDuty,
            HosEvent::Rest(_)                  => DutyStatus::SleeperBerth,
            HosEvent::Drive { .. }             => DutyStatus::Driving,
            HosEvent::CloseWindow { .. }
            | HosEvent::Pickup
            | HosEvent::FuelStop { .. }
            | HosEvent::Dropoff                => DutyStatus::OnDutyNotDriving,
        }
    }

    /// Log-row label for this event.
    pub fn label(&self, ctx: &TripContext<'_>, phase: TripPhase) -> String {
        match self {
            HosEvent::Restart            => "34-hour restart".to_owned(),
            HosEvent::Rest(reason)       => reason.label().to_owned(),
            HosEvent::CloseWindow { .. } => "End of 14-hour duty window".to_owned(),
            HosEvent::Pickup             => format!("Pickup at {}", ctx.input.pickup_label),
            HosEvent::Break              => "30-minute break".to_owned(),
            HosEvent::FuelStop { .. }    => "Fuel stop".to_owned(),
            HosEvent::Drive { .. }       => ctx.drive_label(phase),
            HosEvent::Dropoff            => format!("Dropoff at {}", ctx.input.dropoff_label),
        }
    }

    #[inline]
    pub fn is_drive(&self) -> bool {
        matches!(self, HosEvent::Drive { .. })
    }
}
