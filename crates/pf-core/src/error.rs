//! Failures shared by every powerflow crate.

use thiserror::Error;

pub type PfResult<T> = Result<T, PfError>;

/// Core error kinds. Higher layers wrap these in their own enums.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PfError {
    /// A computation produced NaN or an infinity.
    #[error("Non-finite value in {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A structural guarantee (e.g. 3 phases per waveform) does not hold.
    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
