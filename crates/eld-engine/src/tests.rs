//! Unit and scenario tests for eld-engine.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use eld_core::{DutyStatus, HosPolicy};

use crate::{DutyInterval, SimulationInput};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-03-04T06:00:00-05:00").unwrap()
}

fn trip(pickup: f64, dropoff: f64, cycle: f64) -> SimulationInput {
    SimulationInput::new("Chicago, IL", "Joliet, IL", "Denver, CO", pickup, dropoff, start(), cycle)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn row(iv: &DutyInterval) -> (NaiveDate, NaiveTime, NaiveTime, DutyStatus, &str) {
    (iv.date, iv.start_time, iv.end_time, iv.status, iv.label.as_str())
}

/// Rows glued back together across midnight splits and driving chunks.
#[derive(Debug)]
struct Span {
    status: DutyStatus,
    label:  String,
    start:  NaiveDateTime,
    end:    NaiveDateTime,
}

impl Span {
    fn secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    fn is_off(&self) -> bool {
        !self.status.is_on_duty()
    }
}

fn spans(intervals: &[DutyInterval]) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::new();
    for iv in intervals {
        if let Some(last) = out.last_mut() {
            if last.status == iv.status && last.label == iv.label && last.end == iv.start_datetime() {
                last.end = iv.end_datetime();
                continue;
            }
        }
        out.push(Span {
            status: iv.status,
            label:  iv.label.clone(),
            start:  iv.start_datetime(),
            end:    iv.end_datetime(),
        });
    }
    out
}

fn total_secs(intervals: &[DutyInterval], status: DutyStatus) -> i64 {
    intervals
        .iter()
        .filter(|iv| iv.status == status)
        .map(|iv| iv.duration().num_seconds())
        .sum()
}

/// Every property a finished log must satisfy.
fn assert_log_invariants(input: &SimulationInput, policy: &HosPolicy, intervals: &[DutyInterval]) {
    assert!(!intervals.is_empty());

    // Sorted, strictly positive, non-overlapping per date.
    for w in intervals.windows(2) {
        assert!((w[0].date, w[0].start_time) <= (w[1].date, w[1].start_time), "unsorted: {w:?}");
        assert!(!w[0].overlaps(&w[1]), "overlap: {w:?}");
    }
    for iv in intervals {
        assert!(iv.start_time < iv.end_time, "empty row: {iv:?}");
    }

    // Contiguous from the start instant to the dropoff.
    assert_eq!(intervals[0].start_datetime(), input.start.naive_local());
    for w in intervals.windows(2) {
        assert_eq!(w[0].end_datetime(), w[1].start_datetime(), "gap: {w:?}");
    }
    let last = intervals.last().unwrap();
    assert_eq!(last.status, DutyStatus::OnDutyNotDriving);
    assert!(last.label.starts_with("Dropoff at"));

    let spans = spans(intervals);
    let rest = policy.rest_secs();
    let mut cycle = eld_core::hours_to_secs(input.cycle_hours_at_start);
    let mut driving_in_window = 0;
    let mut since_break = 0;
    let mut window_start: Option<NaiveDateTime> = None;

    for span in &spans {
        if span.is_off() {
            if span.secs() >= policy.restart_secs() && span.status == DutyStatus::OffDuty {
                cycle = 0;
            }
            if span.secs() >= rest {
                driving_in_window = 0;
                window_start = None;
            }
            if span.secs() >= policy.break_secs() {
                since_break = 0;
            }
            continue;
        }

        cycle += span.secs();
        assert!(cycle <= policy.cycle_secs(), "cycle exceeded at {span:?}");

        let opened = *window_start.get_or_insert(span.start);
        assert!(
            (span.end - opened).num_seconds() <= policy.duty_window_secs(),
            "duty window exceeded at {span:?}"
        );

        if span.status == DutyStatus::Driving {
            driving_in_window += span.secs();
            since_break += span.secs();
            assert!(driving_in_window <= policy.driving_window_secs(), "driving cap at {span:?}");
            assert!(since_break <= policy.break_threshold_secs(), "break rule at {span:?}");
        }
    }

    // Fuel stops sit on distinct multiples of the interval.
    let fuel: Vec<f64> = spans
        .iter()
        .filter(|s| s.label == "Fuel stop")
        .map(|s| s.start)
        .filter_map(|t| intervals.iter().find(|iv| iv.start_datetime() == t))
        .map(|iv| iv.distance_marker_miles)
        .collect();
    for (i, marker) in fuel.iter().enumerate() {
        let expected = (i + 1) as f64 * policy.fueling_interval_miles;
        assert!((marker - expected).abs() < 1e-6, "fuel stop {i} at {marker}");
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::simulate;
    use eld_core::END_OF_DAY;

    #[test]
    fn short_trip_has_no_mandatory_events() {
        let input = trip(0.0, 300.0, 0.0);
        let log = simulate(&input).unwrap();

        assert_eq!(log.len(), 7);
        assert_eq!(row(&log[0]), (day(4), hm(6, 0), hm(7, 0), DutyStatus::OnDutyNotDriving, "Pickup at Joliet, IL"));
        for (i, iv) in log[1..6].iter().enumerate() {
            let h = 7 + i as u32;
            assert_eq!(row(iv), (day(4), hm(h, 0), hm(h + 1, 0), DutyStatus::Driving, "Driving to Denver, CO"));
            assert!((iv.distance_marker_miles - 60.0 * (i + 1) as f64).abs() < 1e-6);
        }
        assert_eq!(row(&log[6]), (day(4), hm(12, 0), hm(13, 0), DutyStatus::OnDutyNotDriving, "Dropoff at Denver, CO"));

        assert_eq!(total_secs(&log, DutyStatus::Driving), 5 * 3600);
        assert_eq!(total_secs(&log, DutyStatus::SleeperBerth), 0);
        assert_eq!(total_secs(&log, DutyStatus::OffDuty), 0);
        assert_eq!(log.iter().filter(|iv| iv.label.starts_with("Dropoff")).count(), 1);
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn break_after_eight_hours_of_driving() {
        let input = trip(0.0, 700.0, 0.0);
        let log = simulate(&input).unwrap();

        let brk = log.iter().find(|iv| iv.label == "30-minute break").unwrap();
        assert_eq!(row(brk), (day(4), hm(15, 0), hm(15, 30), DutyStatus::OffDuty, "30-minute break"));
        assert!((brk.distance_marker_miles - 480.0).abs() < 1e-6);

        let close = log.iter().find(|iv| iv.label == "End of 14-hour duty window").unwrap();
        assert_eq!((close.start_time, close.end_time), (hm(18, 30), hm(20, 0)));

        let rest: Vec<_> = log.iter().filter(|iv| iv.status == DutyStatus::SleeperBerth).collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(row(rest[0]), (day(4), hm(20, 0), END_OF_DAY, DutyStatus::SleeperBerth, "10-hour rest after 11 hours driving"));
        assert_eq!(row(rest[1]), (day(5), hm(0, 0), hm(6, 0), DutyStatus::SleeperBerth, "10-hour rest after 11 hours driving"));

        let last = log.last().unwrap();
        assert_eq!(row(last), (day(5), hm(6, 40), hm(7, 40), DutyStatus::OnDutyNotDriving, "Dropoff at Denver, CO"));
        assert!((last.distance_marker_miles - 700.0).abs() < 1e-6);
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn long_trip_fuels_every_thousand_miles() {
        let input = trip(0.0, 2_800.0, 0.0);
        let log = simulate(&input).unwrap();

        let fuel: Vec<_> = log.iter().filter(|iv| iv.label == "Fuel stop").collect();
        assert_eq!(fuel.len(), 2);
        assert_eq!(row(fuel[0]), (day(5), hm(11, 40), hm(11, 55), DutyStatus::OnDutyNotDriving, "Fuel stop"));
        assert_eq!(row(fuel[1]), (day(7), hm(6, 20), hm(6, 35), DutyStatus::OnDutyNotDriving, "Fuel stop"));
        assert!((fuel[0].distance_marker_miles - 1_000.0).abs() < 1e-6);
        assert!((fuel[1].distance_marker_miles - 2_000.0).abs() < 1e-6);

        let rests: Vec<_> = spans(&log)
            .into_iter()
            .filter(|s| s.status == DutyStatus::SleeperBerth)
            .collect();
        assert_eq!(rests.len(), 4);
        assert!(rests.iter().all(|s| s.secs() == 10 * 3600));

        assert_eq!(row(log.last().unwrap()).0, day(8));
        assert_eq!(log.last().unwrap().start_time, hm(8, 40));
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn nearly_spent_cycle_restarts_first() {
        let input = trip(0.0, 100.0, 69.9);
        let log = simulate(&input).unwrap();

        assert_eq!(row(&log[0]), (day(4), hm(6, 0), END_OF_DAY, DutyStatus::OffDuty, "34-hour restart"));
        assert_eq!(row(&log[1]), (day(5), hm(0, 0), hm(16, 0), DutyStatus::OffDuty, "34-hour restart"));
        assert_eq!(row(&log[2]), (day(5), hm(16, 0), hm(17, 0), DutyStatus::OnDutyNotDriving, "Pickup at Joliet, IL"));
        assert_eq!(total_secs(&log[..2], DutyStatus::Driving), 0);
        assert_eq!(row(log.last().unwrap()).1, hm(18, 40));
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn service_that_spends_the_cycle_is_followed_by_restart() {
        let input = trip(0.0, 600.0, 69.0);
        let log = simulate(&input).unwrap();

        assert_eq!(log[0].label, "Pickup at Joliet, IL");
        assert_eq!((log[1].start_time, log[1].status), (hm(7, 0), DutyStatus::OffDuty));
        assert_eq!(log[1].label, "34-hour restart");
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn full_cycle_restarts_before_anything() {
        let input = trip(10.0, 10.0, 70.0);
        let log = simulate(&input).unwrap();
        assert_eq!(log[0].label, "34-hour restart");
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn pickup_leg_is_driven_first() {
        let input = trip(120.0, 60.0, 0.0);
        let log = simulate(&input).unwrap();

        assert_eq!(row(&log[0]), (day(4), hm(6, 0), hm(7, 0), DutyStatus::Driving, "Driving to Joliet, IL"));
        assert_eq!(row(&log[2]), (day(4), hm(8, 0), hm(9, 0), DutyStatus::OnDutyNotDriving, "Pickup at Joliet, IL"));
        assert!((log[2].distance_marker_miles - 120.0).abs() < 1e-6);
        assert_eq!(log[3].label, "Driving to Denver, CO");
        assert_log_invariants(&input, &HosPolicy::default(), &log);
    }

    #[test]
    fn zero_distance_trip_is_pickup_then_dropoff() {
        let input = trip(0.0, 0.0, 0.0);
        let log = simulate(&input).unwrap();
        let labels: Vec<_> = log.iter().map(|iv| iv.label.as_str()).collect();
        assert_eq!(labels, ["Pickup at Joliet, IL", "Dropoff at Denver, CO"]);
    }

    #[test]
    fn pickup_at_destination_is_serviced_before_dropoff() {
        let input = trip(60.0, 0.0, 0.0);
        let log = simulate(&input).unwrap();
        let labels: Vec<_> = log.iter().map(|iv| iv.label.as_str()).collect();
        assert_eq!(labels, ["Driving to Joliet, IL", "Pickup at Joliet, IL", "Dropoff at Denver, CO"]);
    }
}

// ── Randomized properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{NoopObserver, SimulationBuilder, SimulationOptions, simulate};

    #[test]
    fn random_trips_satisfy_hours_of_service() {
        let policy = HosPolicy::default();
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut input = trip(
                rng.gen_range(0.0..1_500.0),
                rng.gen_range(0.0..3_500.0),
                rng.gen_range(0.0..=70.0),
            );
            input.start += TimeDelta::minutes(rng.gen_range(0..1_440));
            let log = simulate(&input).unwrap();
            assert_log_invariants(&input, &policy, &log);
        }
    }

    #[test]
    fn simulate_is_idempotent() {
        let input = trip(250.0, 2_300.0, 33.3);
        assert_eq!(simulate(&input).unwrap(), simulate(&input).unwrap());

        let sim = SimulationBuilder::new(input).build().unwrap();
        let first = sim.run(&mut NoopObserver).unwrap();
        let second = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bounded_steps_match_minute_steps() {
        for (pickup, dropoff, cycle) in [(0.0, 700.0, 0.0), (120.0, 1_300.0, 40.0), (50.0, 300.0, 69.5)] {
            let input = trip(pickup, dropoff, cycle);
            let bounded = simulate(&input).unwrap();
            let minute = SimulationBuilder::new(input)
                .options(SimulationOptions::minute_stepped())
                .build()
                .unwrap()
                .run(&mut NoopObserver)
                .unwrap();

            assert_eq!(bounded.len(), minute.len(), "row count for {pickup}/{dropoff}/{cycle}");
            for (a, b) in bounded.iter().zip(&minute) {
                assert_eq!(row(a), row(b));
                assert!((a.distance_marker_miles - b.distance_marker_miles).abs() < 1e-6, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn route_steps_shape_the_pace() {
        let policy = HosPolicy::default();
        // 60 mi at 30 mph, then the remainder at the 60 mph average.
        let input = trip(0.0, 120.0, 0.0)
            .with_route_steps(vec![eld_core::RouteStep::new(60.0, 2.0, "city streets")]);
        let log = simulate(&input).unwrap();

        assert_eq!(total_secs(&log, DutyStatus::Driving), 3 * 3600);
        assert!((log[1].distance_marker_miles - 30.0).abs() < 1e-6);
        assert!((log[3].distance_marker_miles - 120.0).abs() < 1e-6);
        assert_log_invariants(&input, &policy, &log);
    }
}

// ── Building blocks ───────────────────────────────────────────────────────────

#[cfg(test)]
mod pace {
    use eld_core::RouteStep;

    use crate::Pace;

    #[test]
    fn constant_pace() {
        let pace = Pace::constant(60.0);
        assert!((pace.secs_between(0.0, 90.0) - 5_400.0).abs() < 1e-9);
        assert!((pace.miles_after(10.0, 1_800.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn stepped_pace_with_fallback_tail() {
        let steps = [
            RouteStep::new(100.0, 1.0, "I-55"),
            RouteStep::new(0.0, 0.1, "merge"),
            RouteStep::new(50.0, 1.0, "US-34"),
        ];
        let pace = Pace::from_steps(&steps, 60.0);
        assert!((pace.secs_between(0.0, 150.0) - 7_200.0).abs() < 1e-6);
        assert!((pace.secs_between(50.0, 200.0) - 8_400.0).abs() < 1e-6);
        assert!((pace.miles_after(0.0, 5_400.0) - 125.0).abs() < 1e-6);
        assert!((pace.miles_after(150.0, 60.0) - 151.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod clock {
    use super::*;
    use crate::{ClockState, SimError};

    #[test]
    fn on_duty_opens_window_and_off_duty_does_not() {
        let policy = HosPolicy::default();
        let mut clock = ClockState::new(&trip(0.0, 100.0, 5.0));
        assert_eq!(clock.cycle_secs, 5 * 3600);

        clock.advance_off_duty(1_800).unwrap();
        assert!(!clock.is_window_open());
        assert_eq!(clock.cycle_secs, 5 * 3600);
        assert_eq!(clock.duty_window_left(&policy), 14 * 3600);

        clock.advance_on_duty(3_600).unwrap();
        assert_eq!(clock.duty_window_start, Some(start() + TimeDelta::minutes(30)));
        clock.advance_driving(7_200, 120.0).unwrap();
        assert_eq!(clock.window_elapsed_secs(), 3 * 3600);
        assert_eq!(clock.driving_window_left(&policy), 9 * 3600);
        assert_eq!(clock.break_left(&policy), 6 * 3600);
        assert_eq!(clock.cycle_hours(), 8.0);
        assert_eq!(clock.distance_covered, 120.0);
    }

    #[test]
    fn resets_are_scoped() {
        let mut clock = ClockState::new(&trip(0.0, 100.0, 0.0));
        clock.advance_driving(3_600, 60.0).unwrap();

        clock.reset_after_break();
        assert_eq!(clock.driving_since_break_secs, 0);
        assert_eq!(clock.driving_window_secs, 3_600);

        clock.reset_after_duty_window_close();
        assert_eq!((clock.duty_window_secs, clock.driving_window_secs), (0, 0));
        assert!(clock.duty_window_start.is_none());
        assert_eq!(clock.cycle_secs, 3_600);

        clock.reset_after_cycle_restart();
        assert_eq!(clock.cycle_secs, 0);
    }

    #[test]
    fn overflowing_advance_leaves_state_untouched() {
        let mut clock = ClockState::new(&trip(0.0, 100.0, 0.0));
        let last = DateTime::<chrono::Utc>::MAX_UTC.fixed_offset() - TimeDelta::hours(1);
        clock.sim_clock = last;

        let err = clock.advance_on_duty(2 * 3600).unwrap_err();
        assert!(matches!(err, SimError::ClockOverflow { secs: 7_200, .. }));
        assert_eq!(clock.sim_clock, last);
        assert_eq!(clock.cycle_secs, 0);
        assert!(clock.duty_window_start.is_none());

        assert!(clock.advance_off_duty(i64::MAX).is_err());
        assert!(clock.advance_driving(i64::MAX, 1.0).is_err());
        assert_eq!(clock.distance_covered, 0.0);

        clock.advance_off_duty(1_800).unwrap();
        assert_eq!(clock.sim_clock, last + TimeDelta::minutes(30));
    }

    #[test]
    fn fuel_ordinals_advance() {
        let mut clock = ClockState::new(&trip(0.0, 100.0, 0.0));
        assert_eq!(clock.next_fuel_ordinal(), 1);
        clock.fuel_stops_taken.insert(1);
        assert_eq!(clock.next_fuel_ordinal(), 2);
    }
}

#[cfg(test)]
mod trigger {
    use super::*;
    use crate::trigger::next_event;
    use crate::{ClockState, HosEvent, Pace, RestReason, SimulationOptions, TripContext, TripPhase};

    fn eval(input: &SimulationInput, clock: &ClockState, phase: TripPhase) -> HosEvent {
        let policy = HosPolicy::default();
        let pace = Pace::constant(policy.average_speed_mph);
        let options = SimulationOptions::default();
        let ctx = TripContext::new(input, &policy, &pace, &options);
        next_event(clock, phase, &ctx)
    }

    fn open_clock(input: &SimulationInput, elapsed_h: i64) -> ClockState {
        let mut clock = ClockState::new(input);
        clock.duty_window_start = Some(input.start);
        clock.sim_clock = input.start + TimeDelta::hours(elapsed_h);
        clock
    }

    #[test]
    fn unreachable_target_drives_for_the_time_limit() {
        let input = trip(0.0, 100.0, 0.0);
        let policy = HosPolicy::default();
        let options = SimulationOptions::default();
        let clock = open_clock(&input, 0);
        for hours in [1.0e300, f64::MAX] {
            let pace = Pace::from_steps(&[eld_core::RouteStep::new(100.0, hours, "closed")], 60.0);
            assert!(pace.secs_between(0.0, 100.0) > i64::MAX as f64);
            let ctx = TripContext::new(&input, &policy, &pace, &options);
            match next_event(&clock, TripPhase::PostPickup, &ctx) {
                HosEvent::Drive { secs, to_miles } => {
                    assert_eq!(secs, 8 * 3600);
                    assert!(to_miles < 1e-9);
                }
                other => panic!("expected a drive, got {other:?}"),
            }
        }
    }

    #[test]
    fn restart_beats_everything() {
        let input = trip(0.0, 500.0, 70.0);
        let mut clock = open_clock(&input, 14);
        clock.driving_window_secs = 11 * 3600;
        clock.driving_since_break_secs = 8 * 3600;
        assert_eq!(eval(&input, &clock, TripPhase::PrePickup), HosEvent::Restart);
    }

    #[test]
    fn window_rest_reason_follows_driving() {
        let input = trip(0.0, 500.0, 0.0);
        let mut clock = open_clock(&input, 14);
        assert_eq!(eval(&input, &clock, TripPhase::PostPickup), HosEvent::Rest(RestReason::DutyWindow));
        clock.driving_window_secs = 11 * 3600;
        assert_eq!(eval(&input, &clock, TripPhase::PostPickup), HosEvent::Rest(RestReason::DrivingWindow));
    }

    #[test]
    fn spent_driving_window_closes_out() {
        let input = trip(0.0, 500.0, 0.0);
        let mut clock = open_clock(&input, 12);
        clock.driving_window_secs = 11 * 3600;
        assert_eq!(eval(&input, &clock, TripPhase::PostPickup), HosEvent::CloseWindow { secs: 2 * 3600 });
    }

    #[test]
    fn pickup_beats_break() {
        let input = trip(0.0, 500.0, 0.0);
        let mut clock = open_clock(&input, 9);
        clock.driving_since_break_secs = 8 * 3600;
        assert_eq!(eval(&input, &clock, TripPhase::PrePickup), HosEvent::Pickup);
        assert_eq!(eval(&input, &clock, TripPhase::PostPickup), HosEvent::Break);
    }

    #[test]
    fn pickup_that_overruns_the_window_waits_for_rest() {
        let input = trip(0.0, 500.0, 0.0);
        let mut clock = open_clock(&input, 13);
        assert_eq!(eval(&input, &clock, TripPhase::PrePickup), HosEvent::Pickup);
        clock.sim_clock += TimeDelta::minutes(30);
        assert_eq!(eval(&input, &clock, TripPhase::PrePickup), HosEvent::Rest(RestReason::BeforePickup));
    }

    #[test]
    fn break_beats_fuel() {
        let input = trip(0.0, 1_500.0, 0.0);
        let mut clock = open_clock(&input, 9);
        clock.distance_covered = 1_000.0;
        clock.driving_since_break_secs = 8 * 3600;
        assert_eq!(eval(&input, &clock, TripPhase::PostPickup), HosEvent::Break);
        clock.driving_since_break_secs = 0;
        assert_eq!(eval(&input, &clock, TripPhase::PostPickup), HosEvent::FuelStop { ordinal: 1 });
    }

    #[test]
    fn drive_stops_at_nearest_limit() {
        let input = trip(0.0, 1_500.0, 0.0);
        let mut clock = open_clock(&input, 1);
        clock.driving_since_break_secs = 7 * 3600;
        assert_eq!(
            eval(&input, &clock, TripPhase::PostPickup),
            HosEvent::Drive { secs: 3600, to_miles: 60.0 }
        );

        clock.driving_since_break_secs = 0;
        clock.distance_covered = 970.0;
        assert_eq!(
            eval(&input, &clock, TripPhase::PostPickup),
            HosEvent::Drive { secs: 1_800, to_miles: 1_000.0 }
        );
    }
}

#[cfg(test)]
mod emitter {
    use super::*;
    use crate::{Draft, IntervalEmitter, Pace, SimulationOptions, TripContext};
    use eld_core::{END_OF_DAY, GeoPoint, MIDNIGHT, Polyline};

    fn at(h: i64, m: i64) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-04T00:00:00-05:00").unwrap()
            + TimeDelta::hours(h)
            + TimeDelta::minutes(m)
    }

    #[test]
    fn end_of_day_on_the_last_calendar_date() {
        let iv = DutyInterval {
            date:                  NaiveDate::MAX,
            start_time:            hm(22, 0),
            end_time:              END_OF_DAY,
            status:                DutyStatus::OffDuty,
            label:                 "Rest".to_owned(),
            distance_marker_miles: 0.0,
            position:              None,
        };
        assert_eq!(iv.end_datetime(), NaiveDate::MAX.and_time(END_OF_DAY));
        assert_eq!(iv.start_datetime(), NaiveDate::MAX.and_time(hm(22, 0)));
    }

    fn draft(from: (i64, i64), to: (i64, i64), status: DutyStatus, label: &str, miles: (f64, f64)) -> Draft {
        Draft {
            start:       at(from.0, from.1),
            end:         at(to.0, to.1),
            status,
            label:       label.to_owned(),
            start_miles: miles.0,
            end_miles:   miles.1,
        }
    }

    fn with_emitter(input: &SimulationInput, f: impl FnOnce(&mut IntervalEmitter<'_>)) -> (Vec<DutyInterval>, Vec<DutyInterval>) {
        let policy = HosPolicy::default();
        let pace = Pace::constant(policy.average_speed_mph);
        let options = SimulationOptions::default();
        let ctx = TripContext::new(input, &policy, &pace, &options);
        let mut emitter = IntervalEmitter::new(&ctx);
        f(&mut emitter);
        emitter.finish()
    }

    #[test]
    fn driving_is_merged_into_hour_rows() {
        let input = trip(0.0, 100.0, 0.0);
        let (rows, dropped) = with_emitter(&input, |e| {
            e.push(draft((7, 0), (7, 20), DutyStatus::Driving, "Driving", (0.0, 20.0)));
            e.push(draft((7, 20), (8, 10), DutyStatus::Driving, "Driving", (20.0, 70.0)));
            e.push(draft((8, 10), (8, 25), DutyStatus::OnDutyNotDriving, "Fuel stop", (70.0, 70.0)));
        });
        assert!(dropped.is_empty());
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].start_time, rows[0].end_time), (hm(7, 0), hm(8, 0)));
        assert!((rows[0].distance_marker_miles - 60.0).abs() < 1e-9);
        assert_eq!((rows[1].start_time, rows[1].end_time), (hm(8, 0), hm(8, 10)));
        assert!((rows[1].distance_marker_miles - 70.0).abs() < 1e-9);
        assert_eq!(rows[2].label, "Fuel stop");
    }

    #[test]
    fn label_change_starts_a_new_row() {
        let input = trip(0.0, 100.0, 0.0);
        let (rows, _) = with_emitter(&input, |e| {
            e.push(draft((7, 0), (7, 30), DutyStatus::Driving, "Driving to A", (0.0, 30.0)));
            e.push(draft((7, 30), (8, 0), DutyStatus::Driving, "Driving to B", (30.0, 60.0)));
        });
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].start_time, hm(7, 30));
    }

    #[test]
    fn rows_are_split_at_midnight() {
        let input = trip(0.0, 100.0, 0.0);
        let (rows, _) = with_emitter(&input, |e| {
            e.push(draft((23, 30), (24, 30), DutyStatus::Driving, "Driving", (0.0, 60.0)));
            e.push(draft((24, 30), (34, 30), DutyStatus::SleeperBerth, "Rest", (60.0, 60.0)));
        });
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].date, rows[0].start_time, rows[0].end_time), (day(4), hm(23, 30), END_OF_DAY));
        assert!((rows[0].distance_marker_miles - 30.0).abs() < 1e-9);
        assert_eq!((rows[1].date, rows[1].start_time, rows[1].end_time), (day(5), MIDNIGHT, hm(0, 30)));
        assert!((rows[1].distance_marker_miles - 60.0).abs() < 1e-9);
        assert_eq!(rows[2].duration(), TimeDelta::hours(10));
    }

    #[test]
    fn span_ending_at_midnight_uses_end_of_day() {
        let input = trip(0.0, 100.0, 0.0);
        let (rows, _) = with_emitter(&input, |e| {
            e.push(draft((22, 0), (24, 0), DutyStatus::OffDuty, "Off", (0.0, 0.0)));
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].end_time, END_OF_DAY);
        assert_eq!(rows[0].duration(), TimeDelta::hours(2));
    }

    #[test]
    fn overlapping_row_is_dropped() {
        let input = trip(0.0, 100.0, 0.0);
        let (rows, dropped) = with_emitter(&input, |e| {
            e.push(draft((10, 0), (11, 0), DutyStatus::OnDutyNotDriving, "Pickup", (0.0, 0.0)));
            e.push(draft((10, 30), (11, 30), DutyStatus::OffDuty, "Late", (0.0, 0.0)));
            e.push(draft((11, 0), (11, 30), DutyStatus::OffDuty, "Fine", (0.0, 0.0)));
        });
        assert_eq!(rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(), ["Pickup", "Fine"]);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].label, "Late");
    }

    #[test]
    fn positions_follow_the_path() {
        let path = Polyline::new(vec![GeoPoint::new(40.0, -90.0), GeoPoint::new(42.0, -90.0)]);
        let input = trip(0.0, 100.0, 0.0).with_path(path);
        let (rows, _) = with_emitter(&input, |e| {
            e.push(draft((7, 0), (7, 50), DutyStatus::Driving, "Driving", (0.0, 50.0)));
            e.push(draft((7, 50), (8, 50), DutyStatus::OnDutyNotDriving, "Dropoff", (50.0, 50.0)));
        });
        let mid = rows[1].position.unwrap();
        assert!((mid.lat - 41.0).abs() < 1e-6);
        assert!((mid.lon + 90.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod validation {
    use super::*;
    use crate::{SimError, SimulationBuilder, SimulationOptions, simulate, simulate_with};

    #[test]
    fn negative_distance_rejected() {
        let err = simulate(&trip(-1.0, 100.0, 0.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidInput { field: "distance_to_pickup_miles", .. }));
    }

    #[test]
    fn cycle_out_of_range_rejected() {
        assert!(matches!(
            simulate(&trip(0.0, 100.0, 70.5)).unwrap_err(),
            SimError::InvalidInput { field: "cycle_hours_at_start", .. }
        ));
        assert!(simulate(&trip(0.0, 100.0, f64::NAN)).is_err());
    }

    #[test]
    fn non_positive_speed_rejected() {
        let policy = HosPolicy { average_speed_mph: 0.0, ..HosPolicy::default() };
        let err = simulate_with(&trip(0.0, 100.0, 0.0), &policy).unwrap_err();
        assert!(matches!(err, SimError::Policy(_)));
    }

    #[test]
    fn instant_route_step_rejected() {
        let input = trip(0.0, 100.0, 0.0).with_route_steps(vec![eld_core::RouteStep::new(10.0, 0.0, "teleport")]);
        assert!(matches!(
            simulate(&input).unwrap_err(),
            SimError::InvalidInput { field: "route_steps", .. }
        ));
    }

    #[test]
    fn zero_step_option_rejected() {
        let options = SimulationOptions { max_step_secs: Some(0), ..SimulationOptions::default() };
        assert!(SimulationBuilder::new(trip(0.0, 100.0, 0.0)).options(options).build().is_err());
    }

    #[test]
    fn oversized_rest_rejected_before_running() {
        let policy = HosPolicy { restart_hours: 1.0e13, ..HosPolicy::default() };
        let err = simulate_with(&trip(0.0, 100.0, 69.9), &policy).unwrap_err();
        assert!(matches!(err, SimError::Policy(_)));
    }

    #[test]
    fn run_past_the_calendar_is_an_error() {
        let end_of_time = DateTime::<chrono::Utc>::MAX_UTC.fixed_offset() - TimeDelta::hours(12);
        let input = SimulationInput { start: end_of_time, ..trip(0.0, 2_000.0, 0.0) };
        let err = simulate(&input).unwrap_err();
        assert!(matches!(err, SimError::ClockOverflow { .. }));
    }

    #[test]
    fn drive_that_cannot_advance_stalls() {
        // The second step is so slow that one time-limited drive moves the
        // odometer by less than an f64 ulp at 500 mi.
        let steps = vec![
            eld_core::RouteStep::new(500.0, 500.0 / 60.0, "interstate"),
            eld_core::RouteStep::new(1.0, 1.0e20, "gridlock"),
        ];
        let input = trip(0.0, 501.0, 0.0).with_route_steps(steps);
        let err = simulate(&input).unwrap_err();
        assert!(
            matches!(err, SimError::Stalled { distance_miles, .. } if (distance_miles - 500.0).abs() < 1e-6),
            "{err}"
        );
    }

    #[test]
    fn iteration_limit_is_fatal() {
        let options = SimulationOptions { max_iterations: 3, ..SimulationOptions::default() };
        let err = SimulationBuilder::new(trip(0.0, 2_000.0, 0.0))
            .options(options)
            .build()
            .unwrap()
            .run(&mut crate::NoopObserver)
            .unwrap_err();
        assert!(matches!(err, SimError::IterationLimit(3)));
    }
}

#[cfg(test)]
mod observer {
    use super::*;
    use crate::{ClockState, HosEvent, SimulationBuilder, SimulationObserver};

    #[derive(Default)]
    struct Audit {
        events:    Vec<HosEvent>,
        rows:      usize,
        dropped:   usize,
        finished:  usize,
        end_miles: f64,
    }

    impl SimulationObserver for Audit {
        fn on_event(&mut self, event: &HosEvent, _clock: &ClockState) {
            self.events.push(event.clone());
        }
        fn on_interval(&mut self, _interval: &DutyInterval) {
            self.rows += 1;
        }
        fn on_dropped(&mut self, _interval: &DutyInterval) {
            self.dropped += 1;
        }
        fn on_finish(&mut self, clock: &ClockState, _intervals: &[DutyInterval]) {
            self.finished += 1;
            self.end_miles = clock.distance_covered;
        }
    }

    #[test]
    fn observer_sees_every_event_and_row() {
        let mut audit = Audit::default();
        let log = SimulationBuilder::new(trip(0.0, 700.0, 0.0))
            .build()
            .unwrap()
            .run(&mut audit)
            .unwrap();

        assert_eq!(audit.rows, log.len());
        assert_eq!(audit.dropped, 0);
        assert_eq!(audit.finished, 1);
        assert!((audit.end_miles - 700.0).abs() < 1e-6);
        assert_eq!(audit.events.first(), Some(&HosEvent::Pickup));
        assert_eq!(audit.events.last(), Some(&HosEvent::Dropoff));
        assert_eq!(audit.events.iter().filter(|e| matches!(e, HosEvent::Break)).count(), 1);
    }
}

#[cfg(test)]
mod recap {
    use super::*;
    use crate::{simulate, summarize_days};

    #[test]
    fn daily_totals() {
        let log = simulate(&trip(0.0, 700.0, 0.0)).unwrap();
        let days = summarize_days(&log);
        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.date, day(4));
        assert_eq!(first.driving_secs, 11 * 3600);
        assert_eq!(first.on_duty_not_driving_secs, 2 * 3600 + 1_800);
        assert_eq!(first.off_duty_secs, 1_800);
        assert_eq!(first.sleeper_berth_secs, 4 * 3600);
        assert_eq!(first.logged_secs(), 18 * 3600);
        assert!((first.mile_marker - 660.0).abs() < 1e-6);

        let second = &days[1];
        assert_eq!(second.sleeper_berth_secs, 6 * 3600);
        assert_eq!(second.driving_secs, 40 * 60);
        assert!((second.on_duty_hours() - (1.0 + 40.0 / 60.0)).abs() < 1e-9);
        assert!((second.miles_driven - 40.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod batch {
    use super::*;
    use crate::{simulate, simulate_batch};

    #[test]
    fn results_keep_input_order() {
        let inputs = [trip(0.0, 300.0, 0.0), trip(-5.0, 10.0, 0.0), trip(100.0, 900.0, 20.0)];
        let results = simulate_batch(&inputs, &HosPolicy::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &simulate(&inputs[0]).unwrap());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap(), &simulate(&inputs[2]).unwrap());
    }
}
