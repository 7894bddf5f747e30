//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `eld-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `eld-core`.
pub type CoreResult<T> = Result<T, CoreError>;
