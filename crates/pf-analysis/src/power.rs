//! Instantaneous, active, reactive and apparent power, and power factor.
//!
//! Only P is observed directly (mean of v·i). Q follows from the power
//! triangle with S = Vrms · Irms (line RMS): Q = sqrt(S² − P²), evaluated as
//! sqrt(S − P) · sqrt(S + P) so that it stays finite whenever S does. The reported
//! apparent power is recomputed as sqrt(P² + Q²). Rounding to 4 digits is
//! applied to the returned values only; intermediate results keep full
//! precision.

use nalgebra::DMatrix;
use pf_core::{Node, Phase, PhaseValues, round_result};
use rayon::prelude::*;

use crate::analyzer::Analyzer;
use crate::error::{AnalysisError, AnalysisResult, finite};

/// Element-wise products of every node's voltage with every node's current.
///
/// Indexed by (voltage node, current node). Same-node entries are the power
/// traces used for P, Q and S; cross terms are exposed for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantaneousPowerTable {
    // Row-major over (voltage node, current node).
    traces: Vec<DMatrix<f64>>,
}

impl InstantaneousPowerTable {
    pub fn get(&self, voltage_node: Node, current_node: Node) -> Option<&DMatrix<f64>> {
        if !(voltage_node.is_measured() && current_node.is_measured()) {
            return None;
        }
        self.traces
            .get(voltage_node.index() * 3 + current_node.index())
    }

    /// Power trace of a node's own voltage and current.
    pub fn own(&self, node: Node) -> Option<&DMatrix<f64>> {
        self.get(node, node)
    }

    /// All traces in positional order: V1·I1, V1·I2, V1·I3, V2·I1, ...
    pub fn as_flat(&self) -> &[DMatrix<f64>] {
        &self.traces
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, Node, &DMatrix<f64>)> + '_ {
        Node::MEASURED
            .into_iter()
            .flat_map(|v| Node::MEASURED.into_iter().map(move |i| (v, i)))
            .zip(self.traces.iter())
            .map(|((v, i), trace)| (v, i, trace))
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Unrounded per-phase power quantities of one node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawPower {
    pub active: PhaseValues,
    pub reactive: PhaseValues,
    /// Vrms · Irms.
    pub apparent_vi: PhaseValues,
    /// sqrt(P² + Q²).
    pub apparent: PhaseValues,
}

impl Analyzer<'_> {
    /// Full (voltage node × current node) table of instantaneous power.
    pub fn instantaneous_power(&self) -> InstantaneousPowerTable {
        let nodes = self.signals().nodes();
        let traces: Vec<DMatrix<f64>> = (0..9)
            .into_par_iter()
            .map(|k| nodes[k / 3].voltage.component_mul(&nodes[k % 3].current))
            .collect();
        tracing::debug!(traces = traces.len(), "computed instantaneous power table");
        InstantaneousPowerTable { traces }
    }

    /// v·i of a node's own voltage and current (3 × N).
    pub fn own_power_trace(&self, node: Node) -> AnalysisResult<DMatrix<f64>> {
        let signals = self.measured(node)?;
        Ok(signals.voltage.component_mul(&signals.current))
    }

    pub(crate) fn raw_power(&self, node: Node) -> AnalysisResult<RawPower> {
        let signals = self.measured(node)?;
        let n = self.samples() as f64;

        let active = PhaseValues::try_from_fn(|p| {
            let r = p.index();
            let mean = signals.voltage.row(r).dot(&signals.current.row(r)) / n;
            finite(mean.abs(), "active power")
        })?;
        let apparent_vi = PhaseValues::try_from_fn(|p| {
            let s = self.line_rms_voltage(node, p)? * self.line_rms_current(node, p)?;
            finite(s, "apparent power")
        })?;
        // S ≥ P holds exactly (Cauchy–Schwarz); clamp rounding noise.
        let reactive = PhaseValues::try_from_fn(|p| {
            let (s, a) = (apparent_vi[p], active[p]);
            let q = (s - a).max(0.0).sqrt() * (s + a).sqrt();
            finite(q, "reactive power")
        })?;
        let apparent = PhaseValues::try_from_fn(|p| {
            finite(active[p].hypot(reactive[p]), "apparent power")
        })?;

        Ok(RawPower {
            active,
            reactive,
            apparent_vi,
            apparent,
        })
    }

    /// P per phase: |mean(v·i)| of the node's own pair, rounded to 4 digits.
    pub fn active_power(&self, node: Node) -> AnalysisResult<PhaseValues> {
        Ok(self.raw_power(node)?.active.map(round_result))
    }

    /// Q per phase: sqrt(S² − P²) with S = Vrms · Irms, rounded to 4 digits.
    pub fn reactive_power(&self, node: Node) -> AnalysisResult<PhaseValues> {
        Ok(self.raw_power(node)?.reactive.map(round_result))
    }

    /// S per phase: sqrt(P² + Q²), rounded to 4 digits.
    pub fn apparent_power(&self, node: Node) -> AnalysisResult<PhaseValues> {
        Ok(self.raw_power(node)?.apparent.map(round_result))
    }

    /// PF per phase: P / S, rounded to 4 digits.
    ///
    /// Fails with `DegenerateInput` on the first phase whose apparent power
    /// is zero.
    pub fn power_factor(&self, node: Node) -> AnalysisResult<PhaseValues> {
        let raw = self.raw_power(node)?;
        PhaseValues::try_from_fn(|p| {
            ratio(raw.active[p], raw.apparent[p])
                .map(round_result)
                .ok_or(AnalysisError::degenerate(node, p, "apparent power is zero"))
        })
    }
}

/// P / S, or `None` when S is zero. Both inputs must already be finite.
pub(crate) fn ratio(active: f64, apparent: f64) -> Option<f64> {
    (apparent > 0.0).then(|| active / apparent)
}

/// Phases of `node` whose apparent power vanishes.
pub(crate) fn dead_phases(raw: &RawPower) -> Vec<Phase> {
    Phase::ALL
        .into_iter()
        .filter(|&p| ratio(raw.active[p], raw.apparent[p]).is_none())
        .collect()
}
