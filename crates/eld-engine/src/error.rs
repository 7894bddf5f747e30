use chrono::{DateTime, FixedOffset};
use eld_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        field:  &'static str,
        reason: String,
    },

    #[error("policy error: {0}")]
    Policy(#[from] CoreError),

    #[error("simulation stalled at iteration {iteration}: odometer stuck at {distance_miles:.3} mi")]
    Stalled {
        iteration:      usize,
        distance_miles: f64,
    },

    #[error("simulated clock overflowed advancing {secs} s past {at}")]
    ClockOverflow {
        at:   DateTime<FixedOffset>,
        secs: i64,
    },

    #[error("simulation did not finish within {0} iterations")]
    IterationLimit(usize),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidInput { field, reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
