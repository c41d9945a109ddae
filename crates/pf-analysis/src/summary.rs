//! Tabular views over the analyzer results.
//!
//! These aggregate values already computed elsewhere; the only new numbers
//! are sums over phases and nodes and the system power factor.

use pf_core::{Node, Phase, PhaseValues, round_result, round_to};
use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::error::{AnalysisResult, finite};
use crate::power::{dead_phases, ratio};

/// Digits kept by the system power factor.
const TOTAL_PF_DECIMALS: u32 = 3;

/// RMS voltage and current of nodes 1..=4: phase (line-to-neutral) values
/// for the measured nodes, line values for the derived node 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RmsSummary {
    /// `voltage[node]`, volts.
    pub voltage: [PhaseValues; 4],
    /// `current[node]`, amperes.
    pub current: [PhaseValues; 4],
}

impl RmsSummary {
    pub fn voltage(&self, node: Node) -> &PhaseValues {
        &self.voltage[node.index()]
    }

    pub fn current(&self, node: Node) -> &PhaseValues {
        &self.current[node.index()]
    }
}

/// Line RMS of one measured node, rounded to 4 digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RmsLineRow {
    pub node: Node,
    pub voltage: PhaseValues,
    pub current: PhaseValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RmsLineTable {
    pub rows: [RmsLineRow; 3],
}

/// P, Q, S summed over phases (or nodes) and the resulting power factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerTotals {
    pub active: f64,
    pub reactive: f64,
    pub apparent: f64,
    /// `None` when the apparent power is zero.
    pub power_factor: Option<f64>,
}

impl PowerTotals {
    fn from_sums(active: f64, reactive: f64, apparent: f64) -> AnalysisResult<Self> {
        Ok(Self {
            active: finite(active, "total active power")?,
            reactive: finite(reactive, "total reactive power")?,
            apparent: finite(apparent, "total apparent power")?,
            power_factor: ratio(active, apparent).map(|pf| round_to(pf, TOTAL_PF_DECIMALS)),
        })
    }
}

/// Power quantities of one measured node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePower {
    pub node: Node,
    pub active: PhaseValues,
    pub reactive: PhaseValues,
    pub apparent: PhaseValues,
    /// Per phase; `None` where the apparent power is zero.
    pub power_factor: [Option<f64>; 3],
    pub total: PowerTotals,
}

impl NodePower {
    pub fn power_factor(&self, phase: Phase) -> Option<f64> {
        self.power_factor[phase.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSummary {
    pub nodes: [NodePower; 3],
    pub total: PowerTotals,
}

impl PowerSummary {
    pub fn node(&self, node: Node) -> Option<&NodePower> {
        self.nodes.get(node.index())
    }
}

impl Analyzer<'_> {
    /// Phase RMS (÷√3) of V and I for nodes 1..=3; node 4 is already
    /// reconstructed per phase and reports its line RMS unscaled.
    pub fn rms_summary_table(&self) -> AnalysisResult<RmsSummary> {
        let mut voltage = [PhaseValues::default(); 4];
        let mut current = [PhaseValues::default(); 4];
        for node in Node::ALL {
            let (v, i) = match node {
                Node::N4 => (
                    PhaseValues::try_from_fn(|p| self.line_rms_voltage(node, p))?,
                    PhaseValues::try_from_fn(|p| self.line_rms_current(node, p))?,
                ),
                _ => (
                    PhaseValues::try_from_fn(|p| self.phase_rms(node, p))?,
                    PhaseValues::try_from_fn(|p| self.phase_rms_current(node, p))?,
                ),
            };
            voltage[node.index()] = v;
            current[node.index()] = i;
        }
        Ok(RmsSummary { voltage, current })
    }

    /// Line RMS per measured node, as returned by `rms_voltage`/`rms_current`.
    pub fn rms_line_table(&self) -> AnalysisResult<RmsLineTable> {
        let row = |node: Node| -> AnalysisResult<RmsLineRow> {
            Ok(RmsLineRow {
                node,
                voltage: self.rms_voltage(node)?,
                current: self.rms_current(node)?,
            })
        };
        Ok(RmsLineTable {
            rows: [row(Node::N1)?, row(Node::N2)?, row(Node::N3)?],
        })
    }

    fn node_power(&self, node: Node) -> AnalysisResult<NodePower> {
        let raw = self.raw_power(node)?;

        for phase in dead_phases(&raw) {
            tracing::warn!(%node, %phase, "apparent power is zero; power factor omitted");
        }

        let active = raw.active.map(round_result);
        let reactive = raw.reactive.map(round_result);
        let apparent = raw.apparent.map(round_result);
        let power_factor =
            Phase::ALL.map(|p| ratio(raw.active[p], raw.apparent[p]).map(round_result));

        Ok(NodePower {
            node,
            active,
            reactive,
            apparent,
            power_factor,
            total: PowerTotals::from_sums(active.sum(), reactive.sum(), apparent.sum())?,
        })
    }

    /// P, Q, S and PF per node and phase, with node and system totals.
    pub fn power_summary_table(&self) -> AnalysisResult<PowerSummary> {
        let nodes = [
            self.node_power(Node::N1)?,
            self.node_power(Node::N2)?,
            self.node_power(Node::N3)?,
        ];
        let sum = |f: fn(&PowerTotals) -> f64| nodes.iter().map(|n| f(&n.total)).sum::<f64>();
        let total = PowerTotals::from_sums(
            sum(|t| t.active),
            sum(|t| t.reactive),
            sum(|t| t.apparent),
        )?;
        tracing::debug!(
            p = total.active,
            q = total.reactive,
            s = total.apparent,
            "assembled power summary"
        );
        Ok(PowerSummary { nodes, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::numeric::{Tolerances, nearly_equal};
    use pf_signals::SampleConfig;
    use pf_signals::synth::{ThreePhaseSource, balanced_node};
    use pf_signals::{LineImpedances, SignalSet};

    fn set(i_rms: [f64; 3], load_angle_deg: f64) -> SignalSet {
        let sampling = SampleConfig::default();
        let node = |i: f64| {
            balanced_node(
                ThreePhaseSource::from_rms(100.0, 0.0),
                ThreePhaseSource::from_rms(i, -load_angle_deg),
                &sampling,
                2,
            )
        };
        SignalSet::new(
            [node(i_rms[0]), node(i_rms[1]), node(i_rms[2])],
            LineImpedances::default(),
            sampling,
        )
        .unwrap()
    }

    #[test]
    fn rms_summary_uses_phase_values() {
        let s = set([10.0, 10.0, 10.0], 0.0);
        let a = Analyzer::new(&s).unwrap();
        let table = a.rms_summary_table().unwrap();
        let expected = 100.0 / 3f64.sqrt();
        for (_, v) in table.voltage(Node::N2).iter() {
            assert!((v - expected).abs() < 1e-9);
        }
        for (_, i) in table.current(Node::N1).iter() {
            assert!((i - 10.0 / 3f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn rms_summary_reports_node4_unscaled() {
        // No load current: V4 equals the common bus voltage.
        let s = set([0.0, 0.0, 0.0], 0.0);
        let a = Analyzer::new(&s).unwrap();
        let table = a.rms_summary_table().unwrap();
        for (_, v) in table.voltage(Node::N4).iter() {
            assert!(nearly_equal(v, 100.0, Tolerances { abs: 1e-9, rel: 1e-9 }));
        }
        assert_eq!(*table.current(Node::N4), PhaseValues::default());
        for (_, v) in table.voltage(Node::N1).iter() {
            assert!(nearly_equal(v, 100.0 / 3f64.sqrt(), Tolerances::default()));
        }
    }

    #[test]
    fn line_table_is_rounded_line_rms() {
        let s = set([10.0, 5.0, 2.5], 0.0);
        let a = Analyzer::new(&s).unwrap();
        let table = a.rms_line_table().unwrap();
        assert_eq!(table.rows[1].node, Node::N2);
        assert_eq!(table.rows[1].current, PhaseValues::new(5.0, 5.0, 5.0));
        assert_eq!(table.rows[2].voltage, PhaseValues::new(100.0, 100.0, 100.0));
    }

    #[test]
    fn power_totals_sum_phases_and_nodes() {
        let s = set([10.0, 5.0, 2.0], 60.0);
        let a = Analyzer::new(&s).unwrap();
        let summary = a.power_summary_table().unwrap();
        let n1 = summary.node(Node::N1).unwrap();
        assert!((n1.total.active - 1500.0).abs() < 1e-3);
        assert!((n1.total.apparent - 3000.0).abs() < 1e-3);
        assert_eq!(n1.total.power_factor, Some(0.5));
        // 3 × 100 V × (10 + 5 + 2) A × cos 60°
        assert!((summary.total.active - 2550.0).abs() < 1e-2);
        assert_eq!(summary.total.power_factor, Some(0.5));
    }

    #[test]
    fn dead_node_keeps_table_alive() {
        let s = set([10.0, 0.0, 10.0], 0.0);
        let a = Analyzer::new(&s).unwrap();
        let summary = a.power_summary_table().unwrap();
        let n2 = summary.node(Node::N2).unwrap();
        assert_eq!(n2.power_factor, [None, None, None]);
        assert_eq!(n2.total.power_factor, None);
        assert_eq!(n2.active, PhaseValues::default());
        assert_eq!(summary.node(Node::N1).unwrap().power_factor(Phase::A), Some(1.0));
    }
}
