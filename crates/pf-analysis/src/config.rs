//! Analysis options.

use serde::{Deserialize, Serialize};

/// How the phase difference between two waveforms is estimated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEstimator {
    /// Offset between the first peak samples (argmax) of the two waveforms,
    /// converted to an electrical angle. Coarse: resolution is one sample and
    /// the result is meaningless when peaks are ambiguous.
    ///
    /// The offset is `argmax(i) - argmax(v)`, the negation of
    /// `argmax(v) - argmax(i)`, so a current that lags its voltage (an
    /// inductive load) gives a positive angle. The angle is wrapped to
    /// (-180°, 180°].
    #[default]
    PeakOffset,
    /// Correlation of each waveform with the fundamental complex exponential
    /// (a single DFT bin). Exact for whole cycles of clean sinusoids.
    Fundamental,
}

impl PhaseEstimator {
    pub fn label(self) -> &'static str {
        match self {
            PhaseEstimator::PeakOffset => "peak_offset",
            PhaseEstimator::Fundamental => "fundamental",
        }
    }
}

/// Options applied by an [`crate::Analyzer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub phase_estimator: PhaseEstimator,
}

impl AnalysisConfig {
    pub fn with_estimator(phase_estimator: PhaseEstimator) -> Self {
        Self { phase_estimator }
    }
}
