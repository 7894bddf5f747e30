//! Simulation observer trait for auditing and data collection.

use crate::{ClockState, DutyInterval, HosEvent};

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: event counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct RestCounter { rests: usize }
///
/// impl SimulationObserver for RestCounter {
///     fn on_event(&mut self, event: &HosEvent, _clock: &ClockState) {
///         if matches!(event, HosEvent::Rest(_)) {
///             self.rests += 1;
///         }
///     }
/// }
/// ```
pub trait SimulationObserver {
    /// Called after every applied event, with the clock state it produced.
    fn on_event(&mut self, _event: &HosEvent, _clock: &ClockState) {}

    /// Called for every row accepted by the emitter, in emission order.
    fn on_interval(&mut self, _interval: &DutyInterval) {}

    /// Called for every row the overlap guard rejected.
    fn on_dropped(&mut self, _interval: &DutyInterval) {}

    /// Called once after the dropoff, with the final sorted rows.
    fn on_finish(&mut self, _clock: &ClockState, _intervals: &[DutyInterval]) {}
}

/// A [`SimulationObserver`] that does nothing.
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

impl<O: SimulationObserver + ?Sized> SimulationObserver for &mut O {
    fn on_event(&mut self, event: &HosEvent, clock: &ClockState) {
        (**self).on_event(event, clock);
    }

    fn on_interval(&mut self, interval: &DutyInterval) {
        (**self).on_interval(interval);
    }

    fn on_dropped(&mut self, interval: &DutyInterval) {
        (**self).on_dropped(interval);
    }

    fn on_finish(&mut self, clock: &ClockState, intervals: &[DutyInterval]) {
        (**self).on_finish(clock, intervals);
    }
}
