//! Signal-set construction errors.

use pf_core::{Node, PfError};
use thiserror::Error;

/// Result type for signal-set operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors raised while assembling or validating a signal set.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// A waveform matrix does not have the expected phase or sample count.
    #[error("Shape mismatch at {node}: {what} (expected {expected}, got {actual})")]
    ShapeMismatch {
        node: Node,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A waveform has no samples.
    #[error("Empty waveform at {node}")]
    EmptyWaveform { node: Node },

    /// The builder never received waveforms for a measured node.
    #[error("Missing waveforms for {node}")]
    MissingNode { node: Node },

    /// Node 4 has no measured waveforms and cannot be supplied.
    #[error("{node} is not a measured node")]
    NotMeasured { node: Node },

    /// A line impedance is zero or non-finite.
    #[error("Line impedance Zl{line} is zero or non-finite")]
    ZeroImpedance { line: usize },

    /// The admittance sum 1/Zl1 + 1/Zl2 + 1/Zl3 vanishes.
    #[error("Admittance sum of the line impedances is zero")]
    DegenerateAdmittance,

    /// Sampling parameters are not usable.
    #[error("Invalid sampling configuration: {what}")]
    InvalidSampling { what: &'static str },
}

impl From<SignalError> for PfError {
    fn from(err: SignalError) -> Self {
        match err {
            SignalError::ShapeMismatch { .. }
            | SignalError::EmptyWaveform { .. }
            | SignalError::MissingNode { .. }
            | SignalError::NotMeasured { .. } => PfError::Invariant {
                what: "signal set shape",
            },
            SignalError::ZeroImpedance { .. } | SignalError::DegenerateAdmittance => {
                PfError::InvalidArg {
                    what: "line impedance",
                }
            }
            SignalError::InvalidSampling { what } => PfError::InvalidArg { what },
        }
    }
}
