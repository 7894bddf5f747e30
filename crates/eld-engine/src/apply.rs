//! Event application: one [`HosEvent`] → one clock transition + one draft.

use chrono::{DateTime, FixedOffset};
use tracing::{debug, trace, warn};

use crate::{ClockState, Draft, HosEvent, SimResult, TripContext, TripPhase};

/// Applies events in order and guarantees drafts never move backwards.
#[derive(Debug, Default)]
pub struct EventApplicator {
    last_end: Option<DateTime<FixedOffset>>,
}

impl EventApplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `event` to `clock` and return its draft interval.
    ///
    /// The draft starts at the clock's current instant, clamped forward to
    /// the end of the previous draft.  Fails only when the clock would leave
    /// the representable date range.
    pub fn apply(
        &mut self,
        event: &HosEvent,
        clock: &mut ClockState,
        phase: TripPhase,
        ctx:   &TripContext<'_>,
    ) -> SimResult<Draft> {
        let policy = ctx.policy;

        if let Some(last_end) = self.last_end {
            if clock.sim_clock < last_end {
                warn!(
                    clock = %clock.sim_clock,
                    last_end = %last_end,
                    "event would start before the previous one ended; clamping"
                );
                clock.sim_clock = last_end;
            }
        }

        let start = clock.sim_clock;
        let start_miles = clock.distance_covered;

        match *event {
            HosEvent::Restart => {
                clock.advance_off_duty(policy.restart_secs())?;
                clock.reset_after_cycle_restart();
                clock.reset_after_break();
            }
            HosEvent::Rest(_) => {
                clock.advance_off_duty(policy.rest_secs())?;
                clock.reset_after_duty_window_close();
                clock.reset_after_break();
            }
            HosEvent::CloseWindow { secs } => {
                clock.advance_on_duty(secs)?;
            }
            HosEvent::Pickup => {
                clock.advance_on_duty(policy.pickup_secs())?;
            }
            HosEvent::Break => {
                clock.advance_off_duty(policy.break_secs())?;
                clock.reset_after_break();
            }
            HosEvent::FuelStop { ordinal } => {
                clock.advance_on_duty(policy.fuel_stop_secs())?;
                clock.fuel_stops_taken.insert(ordinal);
            }
            HosEvent::Drive { secs, to_miles } => {
                let miles = (to_miles - clock.distance_covered).max(0.0);
                clock.advance_driving(secs, miles)?;
            }
            HosEvent::Dropoff => {
                clock.advance_on_duty(policy.dropoff_secs())?;
            }
        }

        let draft = Draft {
            start,
            end: clock.sim_clock,
            status: event.status(),
            label: event.label(ctx, phase),
            start_miles,
            end_miles: clock.distance_covered,
        };
        self.last_end = Some(draft.end);

        if event.is_drive() {
            trace!(
                secs = draft.secs(),
                to_miles = draft.end_miles,
                "drive step"
            );
        } else {
            debug!(
                start = %draft.start,
                end = %draft.end,
                status = %draft.status,
                label = %draft.label,
                cycle_hours = clock.cycle_hours(),
                "applied event"
            );
        }
        Ok(draft)
    }
}
