//! Independent simulation of many trips.
//!
//! Runs share nothing, so with the `parallel` Cargo feature they are spread
//! over Rayon's thread pool.  Results always come back in input order.

use eld_core::HosPolicy;

use crate::{DutyInterval, SimResult, SimulationInput, simulate_with};

/// Simulate every input under `policy`.  One result per input, in order;
/// a failing trip does not affect the others.
pub fn simulate_batch(
    inputs: &[SimulationInput],
    policy: &HosPolicy,
) -> Vec<SimResult<Vec<DutyInterval>>> {
    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(|input| simulate_with(input, policy)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        inputs.par_iter().map(|input| simulate_with(input, policy)).collect()
    }
}
