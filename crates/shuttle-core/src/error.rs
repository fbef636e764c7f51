//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by the primitives in this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid exponential rate {0} (must be finite and > 0)")]
    InvalidRate(f64),

    #[error("invalid gaussian parameters mean={mean} std={std}")]
    InvalidGaussian { mean: f64, std: f64 },

    #[error("non-finite simulation time {0}")]
    NonFiniteTime(f64),
}

/// Shorthand result type for `shuttle-core`.
pub type CoreResult<T> = Result<T, CoreError>;
