//! Error types for analysis operations.

use pf_core::{Node, PfError, Phase};
use pf_signals::SignalError;
use thiserror::Error;

/// Errors surfaced by the analyzer instead of NaN or garbage results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Shape mismatch: {what}")]
    ShapeMismatch { what: String },

    #[error("Degenerate input at {}: {what}", location(.node, .phase))]
    DegenerateInput {
        node: Option<Node>,
        phase: Option<Phase>,
        what: &'static str,
    },

    #[error("Numeric overflow in {what}: {value}")]
    NumericOverflow { what: &'static str, value: f64 },

    #[error("{node} has no measured waveforms")]
    NotMeasured { node: Node },

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn degenerate(node: Node, phase: Phase, what: &'static str) -> Self {
        AnalysisError::DegenerateInput {
            node: Some(node),
            phase: Some(phase),
            what,
        }
    }
}

fn location(node: &Option<Node>, phase: &Option<Phase>) -> String {
    match (node, phase) {
        (Some(n), Some(p)) => format!("{n} phase {p}"),
        (Some(n), None) => n.to_string(),
        (None, Some(p)) => format!("phase {p}"),
        (None, None) => "line impedances".to_string(),
    }
}

impl From<PfError> for AnalysisError {
    fn from(e: PfError) -> Self {
        match e {
            PfError::NonFinite { what, value } => AnalysisError::NumericOverflow { what, value },
            other => AnalysisError::ShapeMismatch {
                what: other.to_string(),
            },
        }
    }
}

/// Reject NaN/inf produced by a computation.
pub(crate) fn finite(v: f64, what: &'static str) -> AnalysisResult<f64> {
    Ok(pf_core::ensure_finite(v, what)?)
}
