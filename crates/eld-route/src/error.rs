//! Routing and planning error type.

use thiserror::Error;

use eld_core::GeoPoint;
use eld_engine::SimError;

/// Errors produced by `eld-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unknown location {0:?}")]
    UnknownLocation(String),

    #[error("no route from {from} to {to}")]
    NoRoute { from: GeoPoint, to: GeoPoint },

    #[error("routing provider error: {0}")]
    Provider(String),

    #[error("invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}

pub type RouteResult<T> = Result<T, RouteError>;
