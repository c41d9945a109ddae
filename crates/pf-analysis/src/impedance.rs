//! Load impedance per node and phase.

use nalgebra::Complex;
use pf_core::units::{Angle, Resistance, degrees, ohms};
use pf_core::{Node, Phase};
use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::config::PhaseEstimator;
use crate::error::{AnalysisError, AnalysisResult, finite};
use crate::phase::{fundamental_offset_deg, peak_offset_deg};

/// Impedance in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceEstimate {
    pub magnitude_ohm: f64,
    /// Voltage angle minus current angle; positive for inductive loads.
    pub angle_deg: f64,
}

impl ImpedanceEstimate {
    pub fn magnitude(&self) -> Resistance {
        ohms(self.magnitude_ohm)
    }

    pub fn angle(&self) -> Angle {
        degrees(self.angle_deg)
    }

    pub fn to_complex(&self) -> Complex<f64> {
        Complex::from_polar(self.magnitude_ohm, self.angle_deg.to_radians())
    }

    pub fn resistance_ohm(&self) -> f64 {
        self.to_complex().re
    }

    pub fn reactance_ohm(&self) -> f64 {
        self.to_complex().im
    }
}

/// Impedance of every measured node and phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceTable {
    pub estimator: PhaseEstimator,
    /// `nodes[node][phase]`.
    pub nodes: [[ImpedanceEstimate; 3]; 3],
}

impl ImpedanceTable {
    pub fn get(&self, node: Node, phase: Phase) -> Option<&ImpedanceEstimate> {
        self.nodes
            .get(node.index())
            .map(|phases| &phases[phase.index()])
    }
}

impl Analyzer<'_> {
    /// Impedance of one node and phase.
    ///
    /// Magnitude is phase RMS voltage over phase RMS current. The angle comes
    /// from `estimator`.
    pub fn impedance(
        &self,
        node: Node,
        phase: Phase,
        estimator: PhaseEstimator,
    ) -> AnalysisResult<ImpedanceEstimate> {
        let signals = self.measured(node)?;
        let v = self.phase_rms(node, phase)?;
        let i = self.phase_rms_current(node, phase)?;
        if i == 0.0 {
            return Err(AnalysisError::degenerate(
                node,
                phase,
                "phase current RMS is zero",
            ));
        }
        let magnitude_ohm = finite(v / i, "impedance magnitude")?;

        let sampling = self.sampling();
        let voltage = signals.phase_voltage(phase);
        let current = signals.phase_current(phase);
        let angle = match estimator {
            PhaseEstimator::PeakOffset => peak_offset_deg(sampling, voltage, current),
            PhaseEstimator::Fundamental => fundamental_offset_deg(sampling, voltage, current),
        };
        let angle_deg = angle.ok_or(AnalysisError::degenerate(
            node,
            phase,
            "no phase reference in waveform",
        ))?;

        Ok(ImpedanceEstimate {
            magnitude_ohm,
            angle_deg,
        })
    }

    /// Impedance table using the configured phase estimator.
    pub fn impedance_per_phase(&self) -> AnalysisResult<ImpedanceTable> {
        self.impedance_per_phase_with(self.phase_estimator())
    }

    pub fn impedance_per_phase_with(
        &self,
        estimator: PhaseEstimator,
    ) -> AnalysisResult<ImpedanceTable> {
        let mut nodes = [[ImpedanceEstimate {
            magnitude_ohm: 0.0,
            angle_deg: 0.0,
        }; 3]; 3];
        for node in Node::MEASURED {
            for phase in Phase::ALL {
                nodes[node.index()][phase.index()] = self.impedance(node, phase, estimator)?;
            }
        }
        tracing::debug!(?estimator, "estimated load impedances");
        Ok(ImpedanceTable { estimator, nodes })
    }
}
