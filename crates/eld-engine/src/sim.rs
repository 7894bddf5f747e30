//! The simulation driver.

use eld_core::HosPolicy;
use tracing::{debug, info};

use crate::{
    ClockState, DISTANCE_EPSILON, DutyInterval, EventApplicator, HosEvent, IntervalEmitter,
    NoopObserver, Pace, SimError, SimResult, SimulationBuilder, SimulationInput,
    SimulationObserver, SimulationOptions, TripContext, TripPhase, trigger,
};

// ── Simulation ────────────────────────────────────────────────────────────────

/// A validated, ready-to-run trip.
///
/// # Run loop
///
/// 1. **Route**: while distance remains, ask [`trigger::next_event`] for the
///    next event and dispatch it.  A drive that makes no progress is fatal.
/// 2. **Close**: once the route is covered, service a pending pickup, then
///    the dropoff, each preceded by a restart or rest when it would not fit.
///
/// Every dispatch applies the event, notifies the observer, advances the
/// trip phase, and feeds the draft to the emitter.  If a non-restart event
/// uses up the cycle, a 34-hour restart is applied before anything else.
///
/// `run` takes `&self`: a `Simulation` can be run any number of times and
/// always produces the same rows.
///
/// Create via [`SimulationBuilder`].
#[derive(Clone, Debug)]
pub struct Simulation {
    pub(crate) input:   SimulationInput,
    pub(crate) policy:  HosPolicy,
    pub(crate) options: SimulationOptions,
    pub(crate) pace:    Pace,
}

impl Simulation {
    pub fn input(&self) -> &SimulationInput {
        &self.input
    }

    pub fn policy(&self) -> &HosPolicy {
        &self.policy
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Run the trip to completion and return rows sorted by
    /// `(date, start_time)`.
    pub fn run<O: SimulationObserver>(&self, observer: &mut O) -> SimResult<Vec<DutyInterval>> {
        let ctx = TripContext::new(&self.input, &self.policy, &self.pace, &self.options);
        let mut run = Run {
            ctx,
            clock:      ClockState::new(&self.input),
            phase:      TripPhase::PrePickup,
            applicator: EventApplicator::new(),
            emitter:    IntervalEmitter::new(&ctx),
            iteration:  0,
            observer:   &mut *observer,
        };

        // ── Route ─────────────────────────────────────────────────────────
        let total = ctx.total_distance();
        while total - run.clock.distance_covered > DISTANCE_EPSILON {
            run.tick()?;
            let event = trigger::next_event(&run.clock, run.phase, &ctx);
            if let HosEvent::Drive { to_miles, .. } = event {
                if to_miles <= run.clock.distance_covered {
                    return Err(SimError::Stalled {
                        iteration:      run.iteration,
                        distance_miles: run.clock.distance_covered,
                    });
                }
            }
            run.dispatch(event)?;
        }

        // ── Close ─────────────────────────────────────────────────────────
        while run.phase != TripPhase::Done {
            if run.phase == TripPhase::PostPickup {
                run.phase = TripPhase::Dropoff;
            }
            run.tick()?;
            let event = trigger::closing_event(&run.clock, run.phase, &ctx);
            run.dispatch(event)?;
        }

        let (clock, intervals, dropped) = run.finish();
        info!(
            intervals = intervals.len(),
            dropped = dropped,
            miles = clock.distance_covered,
            end = %clock.sim_clock,
            cycle_hours = clock.cycle_hours(),
            "simulation finished"
        );
        observer.on_finish(&clock, &intervals);
        Ok(intervals)
    }
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// Mutable state of one `run` call.
struct Run<'a, 'o, O: SimulationObserver> {
    ctx:        TripContext<'a>,
    clock:      ClockState,
    phase:      TripPhase,
    applicator: EventApplicator,
    emitter:    IntervalEmitter<'a>,
    iteration:  usize,
    observer:   &'o mut O,
}

impl<O: SimulationObserver> Run<'_, '_, O> {
    fn tick(&mut self) -> SimResult<()> {
        self.iteration += 1;
        let limit = self.ctx.options.max_iterations;
        if self.iteration > limit {
            return Err(SimError::IterationLimit(limit));
        }
        Ok(())
    }

    fn dispatch(&mut self, event: HosEvent) -> SimResult<()> {
        self.apply(&event)?;

        let exempt = matches!(event, HosEvent::Restart | HosEvent::Dropoff);
        if !exempt && self.clock.cycle_secs >= self.ctx.policy.cycle_secs() {
            debug!(cycle_hours = self.clock.cycle_hours(), "cycle used up; restarting");
            self.apply(&HosEvent::Restart)?;
        }
        Ok(())
    }

    fn apply(&mut self, event: &HosEvent) -> SimResult<()> {
        let draft = self.applicator.apply(event, &mut self.clock, self.phase, &self.ctx)?;
        self.observer.on_event(event, &self.clock);

        match event {
            HosEvent::Pickup => self.phase = TripPhase::PostPickup,
            HosEvent::Dropoff => self.phase = TripPhase::Done,
            _ => {}
        }

        let accepted = self.emitter.accepted().len();
        let dropped = self.emitter.dropped().len();
        self.emitter.push(draft);
        self.report(accepted, dropped);
        Ok(())
    }

    /// Forward rows emitted since the given counts to the observer.
    fn report(&mut self, accepted: usize, dropped: usize) {
        for interval in &self.emitter.accepted()[accepted..] {
            self.observer.on_interval(interval);
        }
        for interval in &self.emitter.dropped()[dropped..] {
            self.observer.on_dropped(interval);
        }
    }

    /// Flush the emitter; returns the final clock, sorted rows, and the
    /// number of dropped rows.
    fn finish(mut self) -> (ClockState, Vec<DutyInterval>, usize) {
        let accepted = self.emitter.accepted().len();
        let dropped = self.emitter.dropped().len();
        self.emitter.flush();
        self.report(accepted, dropped);

        let (intervals, dropped) = self.emitter.finish();
        (self.clock, intervals, dropped.len())
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Simulate `input` under the default policy.
pub fn simulate(input: &SimulationInput) -> SimResult<Vec<DutyInterval>> {
    simulate_with(input, &HosPolicy::default())
}

/// Simulate `input` under `policy`.
pub fn simulate_with(input: &SimulationInput, policy: &HosPolicy) -> SimResult<Vec<DutyInterval>> {
    SimulationBuilder::new(input.clone())
        .policy(policy.clone())
        .build()?
        .run(&mut NoopObserver)
}
