//! Measured waveforms of the four-node segment.

use nalgebra::DMatrix;
use pf_core::{Node, Phase};

use crate::error::{SignalError, SignalResult};
use crate::impedance::LineImpedances;
use crate::sampling::SampleConfig;
use crate::validate;

/// Voltage and current waveforms of one measured node.
///
/// Both matrices are 3 × N: one row per phase (A, B, C), one column per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSignals {
    pub voltage: DMatrix<f64>,
    pub current: DMatrix<f64>,
}

impl NodeSignals {
    pub fn new(voltage: DMatrix<f64>, current: DMatrix<f64>) -> Self {
        Self { voltage, current }
    }

    /// Build from per-phase sample rows of `node`.
    ///
    /// The three rows of each quantity must share one length. Agreement
    /// between voltage and current is checked when the signal set is built.
    pub fn from_rows(
        node: Node,
        voltage: [Vec<f64>; 3],
        current: [Vec<f64>; 3],
    ) -> SignalResult<Self> {
        Ok(Self {
            voltage: rows_to_matrix(node, &voltage)?,
            current: rows_to_matrix(node, &current)?,
        })
    }

    /// Samples of one phase voltage.
    pub fn phase_voltage(&self, phase: Phase) -> impl Iterator<Item = f64> + '_ {
        let r = phase.index();
        (0..self.voltage.ncols()).map(move |c| self.voltage[(r, c)])
    }

    /// Samples of one phase current.
    pub fn phase_current(&self, phase: Phase) -> impl Iterator<Item = f64> + '_ {
        let r = phase.index();
        (0..self.current.ncols()).map(move |c| self.current[(r, c)])
    }
}

fn rows_to_matrix(node: Node, rows: &[Vec<f64>; 3]) -> SignalResult<DMatrix<f64>> {
    let n = rows[0].len();
    for row in &rows[1..] {
        if row.len() != n {
            return Err(SignalError::ShapeMismatch {
                node,
                what: "phase rows of unequal length",
                expected: n,
                actual: row.len(),
            });
        }
    }
    Ok(DMatrix::from_fn(3, n, |r, c| rows[r][c]))
}

/// Complete input of one analysis session: three measured nodes, the line
/// impedances to the common bus, and the sampling timebase.
///
/// Construction validates that every waveform is 3 × N with one shared,
/// non-zero N. Nothing else about the samples is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSet {
    nodes: [NodeSignals; 3],
    impedances: LineImpedances,
    sampling: SampleConfig,
    samples: usize,
}

impl SignalSet {
    pub fn new(
        nodes: [NodeSignals; 3],
        impedances: LineImpedances,
        sampling: SampleConfig,
    ) -> SignalResult<Self> {
        let samples = validate::validate_shape(&nodes)?;
        tracing::debug!(samples, "signal set validated");
        Ok(Self {
            nodes,
            impedances,
            sampling,
            samples,
        })
    }

    /// Waveforms of a measured node (`None` for node 4).
    pub fn node(&self, node: Node) -> Option<&NodeSignals> {
        self.nodes.get(node.index())
    }

    pub fn voltage(&self, node: Node) -> Option<&DMatrix<f64>> {
        self.node(node).map(|n| &n.voltage)
    }

    pub fn current(&self, node: Node) -> Option<&DMatrix<f64>> {
        self.node(node).map(|n| &n.current)
    }

    pub fn nodes(&self) -> &[NodeSignals; 3] {
        &self.nodes
    }

    pub fn impedances(&self) -> &LineImpedances {
        &self.impedances
    }

    pub fn sampling(&self) -> &SampleConfig {
        &self.sampling
    }

    /// Shared sample count N.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Replace the line impedances, keeping the waveforms.
    pub fn with_impedances(mut self, impedances: LineImpedances) -> Self {
        self.impedances = impedances;
        self
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unequal_rows_are_rejected(n in 1usize..64, extra in 1usize..8, row in 0usize..3) {
            let mut voltage = [vec![0.0; n], vec![0.0; n], vec![0.0; n]];
            voltage[row] = vec![0.0; n + extra];
            let current = [vec![0.0; n], vec![0.0; n], vec![0.0; n]];
            let err = NodeSignals::from_rows(Node::N2, voltage, current).unwrap_err();
            let is_shape_error = matches!(err, SignalError::ShapeMismatch { node: Node::N2, .. });
            prop_assert!(is_shape_error);
        }

        #[test]
        fn equal_rows_keep_their_samples(samples in prop::collection::vec(-1.0e3_f64..1.0e3, 1..32)) {
            let rows = [samples.clone(), samples.clone(), samples.clone()];
            let node = NodeSignals::from_rows(Node::N1, rows.clone(), rows).unwrap();
            prop_assert_eq!(node.voltage.shape(), (3, samples.len()));
            let phase_c: Vec<f64> = node.phase_current(Phase::C).collect();
            prop_assert_eq!(phase_c, samples);
        }
    }
}
