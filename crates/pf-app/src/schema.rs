//! Signal file schema.
//!
//! A signal file carries the sampled waveforms of the three measured nodes
//! plus the sampling timebase and line impedances. Both of the latter may be
//! omitted and fall back to the reference acquisition setup.

use pf_core::Node;
use pf_core::constants::{F_NOMINAL_HZ, SAMPLES_PER_CYCLE};
use pf_signals::{Complex, LineImpedances, SampleConfig, SignalSet, SignalSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalFile {
    #[serde(default)]
    pub sampling: SamplingDef,
    #[serde(default)]
    pub impedances: ImpedancesDef,
    /// Exactly three entries: nodes 1, 2 and 3 in order.
    pub nodes: Vec<NodeDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingDef {
    pub frequency_hz: f64,
    pub samples_per_cycle: usize,
}

impl Default for SamplingDef {
    fn default() -> Self {
        Self {
            frequency_hz: F_NOMINAL_HZ,
            samples_per_cycle: SAMPLES_PER_CYCLE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComplexDef {
    pub re: f64,
    #[serde(default)]
    pub im: f64,
}

impl From<ComplexDef> for Complex<f64> {
    fn from(c: ComplexDef) -> Self {
        Complex::new(c.re, c.im)
    }
}

impl From<Complex<f64>> for ComplexDef {
    fn from(c: Complex<f64>) -> Self {
        Self { re: c.re, im: c.im }
    }
}

/// Line impedances in ohms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImpedancesDef {
    pub zl1: ComplexDef,
    pub zl2: ComplexDef,
    pub zl3: ComplexDef,
}

impl Default for ImpedancesDef {
    fn default() -> Self {
        Self::from(&LineImpedances::default())
    }
}

impl From<&LineImpedances> for ImpedancesDef {
    fn from(z: &LineImpedances) -> Self {
        let [zl1, zl2, zl3] = (*z.as_array()).map(ComplexDef::from);
        Self { zl1, zl2, zl3 }
    }
}

/// Waveforms of one node: one row per phase (A, B, C).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub voltage: Vec<Vec<f64>>,
    pub current: Vec<Vec<f64>>,
}

impl SignalFile {
    /// Build a validated signal set from the file contents.
    pub fn to_signal_set(&self) -> AppResult<SignalSet> {
        if self.nodes.len() != Node::MEASURED.len() {
            return Err(AppError::Validation(format!(
                "expected {} nodes, found {}",
                Node::MEASURED.len(),
                self.nodes.len()
            )));
        }

        let sampling =
            SampleConfig::new(self.sampling.frequency_hz, self.sampling.samples_per_cycle)?;
        let impedances = LineImpedances::new(
            self.impedances.zl1.into(),
            self.impedances.zl2.into(),
            self.impedances.zl3.into(),
        )?;

        let mut builder = SignalSetBuilder::new();
        builder.sampling(sampling).impedances(impedances);
        for (node, def) in Node::MEASURED.into_iter().zip(&self.nodes) {
            builder.node_rows(
                node,
                phase_rows(node, "voltage", &def.voltage)?,
                phase_rows(node, "current", &def.current)?,
            );
        }
        Ok(builder.build()?)
    }

    /// Snapshot a signal set into the file representation.
    pub fn from_signal_set(set: &SignalSet) -> Self {
        let rows = |m: &pf_signals::DMatrix<f64>| -> Vec<Vec<f64>> {
            m.row_iter().map(|r| r.iter().copied().collect()).collect()
        };
        Self {
            sampling: SamplingDef {
                frequency_hz: set.sampling().frequency_hz(),
                samples_per_cycle: set.sampling().samples_per_cycle,
            },
            impedances: ImpedancesDef::from(set.impedances()),
            nodes: set
                .nodes()
                .iter()
                .map(|n| NodeDef {
                    voltage: rows(&n.voltage),
                    current: rows(&n.current),
                })
                .collect(),
        }
    }
}

fn phase_rows(node: Node, what: &str, rows: &[Vec<f64>]) -> AppResult<[Vec<f64>; 3]> {
    <[Vec<f64>; 3]>::try_from(rows.to_vec()).map_err(|rows| {
        AppError::Validation(format!(
            "{node} {what} must have 3 phase rows, found {}",
            rows.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(n: usize) -> NodeDef {
        let row = vec![1.0; n];
        NodeDef {
            voltage: vec![row.clone(), row.clone(), row.clone()],
            current: vec![row.clone(), row.clone(), row],
        }
    }

    #[test]
    fn omitted_sections_use_defaults() {
        let yaml = r#"
nodes:
  - { voltage: [[1, 2], [3, 4], [5, 6]], current: [[0, 0], [0, 0], [0, 0]] }
  - { voltage: [[1, 2], [3, 4], [5, 6]], current: [[0, 0], [0, 0], [0, 0]] }
  - { voltage: [[1, 2], [3, 4], [5, 6]], current: [[0, 0], [0, 0], [0, 0]] }
"#;
        let file: SignalFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.sampling, SamplingDef::default());
        assert_eq!(file.impedances, ImpedancesDef::default());
        assert_eq!(file.impedances.zl3, ComplexDef { re: 0.01, im: 0.001 });

        let set = file.to_signal_set().unwrap();
        assert_eq!(set.samples(), 2);
        assert_eq!(set.voltage(Node::N1).unwrap()[(2, 1)], 6.0);
    }

    #[test]
    fn imaginary_part_defaults_to_zero() {
        let c: ComplexDef = serde_json::from_str(r#"{ "re": 0.5 }"#).unwrap();
        assert_eq!(c, ComplexDef { re: 0.5, im: 0.0 });
    }

    #[test]
    fn wrong_node_count_is_rejected() {
        let file = SignalFile {
            sampling: SamplingDef::default(),
            impedances: ImpedancesDef::default(),
            nodes: vec![node(4), node(4)],
        };
        let err = file.to_signal_set().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("expected 3 nodes")));
    }

    #[test]
    fn wrong_phase_count_names_the_node() {
        let mut bad = node(4);
        bad.current.pop();
        let file = SignalFile {
            sampling: SamplingDef::default(),
            impedances: ImpedancesDef::default(),
            nodes: vec![node(4), bad, node(4)],
        };
        let err = file.to_signal_set().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("node 2 current")));
    }

    #[test]
    fn zero_impedance_is_a_validation_error() {
        let mut file = SignalFile {
            sampling: SamplingDef::default(),
            impedances: ImpedancesDef::default(),
            nodes: vec![node(4), node(4), node(4)],
        };
        file.impedances.zl2 = ComplexDef { re: 0.0, im: 0.0 };
        assert!(matches!(
            file.to_signal_set(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn snapshot_restores_the_same_set() {
        let file = SignalFile {
            sampling: SamplingDef {
                frequency_hz: 50.0,
                samples_per_cycle: 4,
            },
            impedances: ImpedancesDef::default(),
            nodes: vec![node(4), node(4), node(4)],
        };
        let set = file.to_signal_set().unwrap();
        assert_eq!(SignalFile::from_signal_set(&set), file);
    }
}
