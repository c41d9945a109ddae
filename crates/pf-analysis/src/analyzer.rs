//! The analysis session object.

use nalgebra::Complex;
use pf_core::Node;
use pf_signals::{NodeSignals, SampleConfig, SignalSet};

use crate::config::{AnalysisConfig, PhaseEstimator};
use crate::error::{AnalysisError, AnalysisResult};

/// Pure computations over one [`SignalSet`].
///
/// Holds a borrow of the input waveforms, the analysis options and the
/// admittance sum of the line impedances, which is checked once here so that
/// the node-4 solve can never divide by zero. Operations live in the sibling
/// modules (`rms`, `node4`, `power`, `impedance`, `phasor`, `summary`).
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    signals: &'a SignalSet,
    config: AnalysisConfig,
    admittance: Complex<f64>,
}

impl<'a> Analyzer<'a> {
    /// Analyzer with default options (peak-offset phase estimation).
    pub fn new(signals: &'a SignalSet) -> AnalysisResult<Self> {
        Self::with_config(signals, AnalysisConfig::default())
    }

    pub fn with_config(signals: &'a SignalSet, config: AnalysisConfig) -> AnalysisResult<Self> {
        let admittance = signals.impedances().admittance_sum().map_err(|_| {
            AnalysisError::DegenerateInput {
                node: None,
                phase: None,
                what: "admittance sum of the line impedances is zero",
            }
        })?;
        tracing::debug!(
            samples = signals.samples(),
            y_re = admittance.re,
            y_im = admittance.im,
            ?config,
            "analyzer ready"
        );
        Ok(Self {
            signals,
            config,
            admittance,
        })
    }

    pub fn signals(&self) -> &'a SignalSet {
        self.signals
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn sampling(&self) -> &'a SampleConfig {
        self.signals.sampling()
    }

    pub fn phase_estimator(&self) -> PhaseEstimator {
        self.config.phase_estimator
    }

    /// Y = 1/Zl1 + 1/Zl2 + 1/Zl3.
    pub fn admittance(&self) -> Complex<f64> {
        self.admittance
    }

    /// Shared sample count N.
    pub fn samples(&self) -> usize {
        self.signals.samples()
    }

    pub(crate) fn measured(&self, node: Node) -> AnalysisResult<&'a NodeSignals> {
        self.signals
            .node(node)
            .ok_or(AnalysisError::NotMeasured { node })
    }
}
