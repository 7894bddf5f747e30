//! Fluent builder for constructing a [`Simulation`].

use eld_core::HosPolicy;

use crate::{Pace, Simulation, SimulationInput, SimulationOptions, SimResult};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                        |
/// |----------------|--------------------------------|
/// | `.policy(p)`   | `HosPolicy::default()`         |
/// | `.options(o)`  | `SimulationOptions::default()` |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimulationBuilder::new(input)
///     .policy(policy)
///     .options(SimulationOptions::minute_stepped())
///     .build()?;
/// let intervals = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimulationBuilder {
    input:   SimulationInput,
    policy:  Option<HosPolicy>,
    options: Option<SimulationOptions>,
}

impl SimulationBuilder {
    pub fn new(input: SimulationInput) -> Self {
        Self { input, policy: None, options: None }
    }

    pub fn policy(mut self, policy: HosPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn options(mut self, options: SimulationOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Validate policy, options, and input, then derive the route pace.
    pub fn build(self) -> SimResult<Simulation> {
        let policy = self.policy.unwrap_or_default();
        let options = self.options.unwrap_or_default();

        policy.validate()?;
        options.validate()?;
        self.input.validate(&policy)?;

        let pace = match &self.input.route_steps {
            Some(steps) => Pace::from_steps(steps, policy.average_speed_mph),
            None => Pace::constant(policy.average_speed_mph),
        };

        Ok(Simulation {
            input: self.input,
            policy,
            options,
            pace,
        })
    }
}
