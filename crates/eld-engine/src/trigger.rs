//! Trigger evaluation: decide the single next event.
//!
//! Rules are checked in strict precedence order and the first match wins:
//!
//! | # | Condition                                   | Event                         |
//! |---|---------------------------------------------|-------------------------------|
//! | 1 | cycle ≥ 70 h                                | `Restart`                     |
//! | 2 | ≥ 14 h since the duty window opened         | `Rest`                        |
//! | 3 | driving window ≥ 11 h                       | `CloseWindow`, then `Rest`    |
//! | 4 | pickup reached, not yet serviced            | `Pickup` (or make room first) |
//! | 5 | driving since break ≥ 8 h                   | `Break`                       |
//! | 6 | next fuel marker reached                    | `FuelStop` (or make room)     |
//! | 7 | otherwise                                   | `Drive`, bounded              |
//!
//! A `Drive` never crosses a limit: it stops at the first of the four clock
//! limits, the optional `max_step_secs`, the next fuel marker, the pickup,
//! or the end of the route.  Every rule above therefore fires exactly at
//! its threshold.

use crate::{ClockState, DISTANCE_EPSILON, HosEvent, RestReason, TripContext, TripPhase};

/// Next event while route distance remains to be covered.
pub fn next_event(clock: &ClockState, phase: TripPhase, ctx: &TripContext<'_>) -> HosEvent {
    let policy = ctx.policy;

    // ① Cycle exhausted.
    if clock.cycle_secs >= policy.cycle_secs() {
        return HosEvent::Restart;
    }

    // ② Duty window exhausted.
    if clock.is_window_open() && clock.window_elapsed_secs() >= policy.duty_window_secs() {
        let reason = if clock.driving_window_secs >= policy.driving_window_secs() {
            RestReason::DrivingWindow
        } else {
            RestReason::DutyWindow
        };
        return HosEvent::Rest(reason);
    }

    // ③ Driving window exhausted: close out the window on duty, then rest.
    if clock.driving_window_secs >= policy.driving_window_secs() {
        let secs = clock.duty_window_left(policy).min(clock.cycle_left(policy));
        return if secs > 0 {
            HosEvent::CloseWindow { secs }
        } else {
            HosEvent::Rest(RestReason::DrivingWindow)
        };
    }

    // ④ Pickup reached.
    if phase == TripPhase::PrePickup
        && clock.distance_covered + DISTANCE_EPSILON >= ctx.input.distance_to_pickup_miles
    {
        return service_or_make_room(HosEvent::Pickup, clock, ctx);
    }

    // ⑤ Break due.
    if clock.driving_since_break_secs >= policy.break_threshold_secs() {
        return HosEvent::Break;
    }

    // ⑥ Fuel stop due.
    let ordinal = clock.next_fuel_ordinal();
    let marker = fuel_marker(ordinal, ctx);
    if clock.distance_covered + DISTANCE_EPSILON >= marker {
        return service_or_make_room(HosEvent::FuelStop { ordinal }, clock, ctx);
    }

    // ⑦ Drive.
    drive_step(clock, phase, marker, ctx)
}

/// Next event once the route is covered: pickup if it is still pending
/// (pickup at the destination), then the dropoff.
pub fn closing_event(clock: &ClockState, phase: TripPhase, ctx: &TripContext<'_>) -> HosEvent {
    let service = match phase {
        TripPhase::PrePickup => HosEvent::Pickup,
        _ => HosEvent::Dropoff,
    };
    service_or_make_room(service, clock, ctx)
}

/// Return `service` if it fits in the remaining cycle and duty window;
/// otherwise the restart or rest that makes room for it.
pub fn service_or_make_room(service: HosEvent, clock: &ClockState, ctx: &TripContext<'_>) -> HosEvent {
    let policy = ctx.policy;
    let (secs, reason) = match service {
        HosEvent::Pickup => (policy.pickup_secs(), RestReason::BeforePickup),
        HosEvent::FuelStop { .. } => (policy.fuel_stop_secs(), RestReason::BeforeFuelStop),
        HosEvent::Dropoff => (policy.dropoff_secs(), RestReason::BeforeDropoff),
        other => return other,
    };

    if clock.cycle_secs + secs > policy.cycle_secs() {
        return HosEvent::Restart;
    }
    if clock.is_window_open() && clock.window_elapsed_secs() + secs > policy.duty_window_secs() {
        return HosEvent::Rest(reason);
    }
    service
}

fn fuel_marker(ordinal: u32, ctx: &TripContext<'_>) -> f64 {
    f64::from(ordinal) * ctx.policy.fueling_interval_miles
}

/// Rule ⑦: drive until the nearest limit or distance target.
fn drive_step(clock: &ClockState, phase: TripPhase, fuel_marker: f64, ctx: &TripContext<'_>) -> HosEvent {
    let policy = ctx.policy;
    let from = clock.distance_covered;

    let mut target = ctx.total_distance().min(fuel_marker);
    if phase == TripPhase::PrePickup {
        target = target.min(ctx.input.distance_to_pickup_miles);
    }

    let mut time_limit = clock
        .driving_window_left(policy)
        .min(clock.duty_window_left(policy))
        .min(clock.cycle_left(policy))
        .min(clock.break_left(policy));
    if let Some(max_step) = ctx.options.max_step_secs {
        time_limit = time_limit.min(max_step);
    }

    // Whole seconds, rounded up so the step actually reaches the target.
    // Targets further away than `i64::MAX` seconds clamp there, which leaves
    // the step bounded by `time_limit`.
    let secs_to_target = (ctx.pace.secs_between(from, target) - 1e-6)
        .ceil()
        .min(i64::MAX as f64) as i64;
    let secs_to_target = secs_to_target.max(1);

    if time_limit >= secs_to_target {
        HosEvent::Drive { secs: secs_to_target, to_miles: target }
    } else {
        let reached = ctx.pace.miles_after(from, time_limit as f64).min(target);
        HosEvent::Drive { secs: time_limit, to_miles: reached }
    }
}
