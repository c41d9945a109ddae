//! Phasor diagram data for all four nodes.
//!
//! Angles are referred to the node-1 phase-A voltage. Node 4 uses the real
//! part of the reconstructed V4 and the summed current I4.

use nalgebra::DMatrix;
use pf_core::{Node, Phase};
use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::config::PhaseEstimator;
use crate::error::{AnalysisError, AnalysisResult};
use crate::phase::{argmax, fundamental_phasor, wrap_degrees};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Voltage,
    Current,
}

/// Peak magnitude and angle (degrees) of one waveform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Phasor {
    pub magnitude: f64,
    pub angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasorSet {
    pub quantity: Quantity,
    pub estimator: PhaseEstimator,
    /// `nodes[node][phase]` for nodes 1..=4.
    pub nodes: [[Phasor; 3]; 4],
}

impl PhasorSet {
    pub fn get(&self, node: Node, phase: Phase) -> &Phasor {
        &self.nodes[node.index()][phase.index()]
    }
}

fn row(m: &DMatrix<f64>, phase: Phase) -> impl Iterator<Item = f64> + '_ {
    let r = phase.index();
    (0..m.ncols()).map(move |c| m[(r, c)])
}

impl Analyzer<'_> {
    pub fn voltage_phasors(&self, estimator: PhaseEstimator) -> AnalysisResult<PhasorSet> {
        self.phasors(Quantity::Voltage, estimator)
    }

    pub fn current_phasors(&self, estimator: PhaseEstimator) -> AnalysisResult<PhasorSet> {
        self.phasors(Quantity::Current, estimator)
    }

    fn waveforms(&self, quantity: Quantity) -> AnalysisResult<[DMatrix<f64>; 4]> {
        let [n1, n2, n3] = self.signals().nodes();
        Ok(match quantity {
            Quantity::Voltage => [
                n1.voltage.clone(),
                n2.voltage.clone(),
                n3.voltage.clone(),
                self.node4_voltage()?.map(|z| z.re),
            ],
            Quantity::Current => [
                n1.current.clone(),
                n2.current.clone(),
                n3.current.clone(),
                self.node4_current()?,
            ],
        })
    }

    pub fn phasors(
        &self,
        quantity: Quantity,
        estimator: PhaseEstimator,
    ) -> AnalysisResult<PhasorSet> {
        let sampling = self.sampling();
        let reference = &self.measured(Node::N1)?.voltage;
        let waveforms = self.waveforms(quantity)?;
        let mut nodes = [[Phasor::default(); 3]; 4];

        match estimator {
            PhaseEstimator::PeakOffset => {
                let ref_peak = argmax(row(reference, Phase::A)).ok_or(
                    AnalysisError::degenerate(Node::N1, Phase::A, "empty waveform"),
                )?;
                for node in Node::ALL {
                    let m = &waveforms[node.index()];
                    for phase in Phase::ALL {
                        let peak = argmax(row(m, phase))
                            .ok_or(AnalysisError::degenerate(node, phase, "empty waveform"))?;
                        let offset = ref_peak as f64 - peak as f64;
                        nodes[node.index()][phase.index()] = Phasor {
                            magnitude: m[(phase.index(), peak)],
                            angle_deg: wrap_degrees(sampling.samples_to_degrees(offset)),
                        };
                    }
                }
            }
            PhaseEstimator::Fundamental => {
                let ref_angle = fundamental_phasor(sampling, row(reference, Phase::A))
                    .filter(|x| x.norm() > 0.0)
                    .map_or(0.0, |x| x.arg());
                for node in Node::ALL {
                    let m = &waveforms[node.index()];
                    for phase in Phase::ALL {
                        let x = fundamental_phasor(sampling, row(m, phase))
                            .ok_or(AnalysisError::degenerate(node, phase, "empty waveform"))?;
                        let angle_deg = if x.norm() > 0.0 {
                            wrap_degrees((x.arg() - ref_angle).to_degrees())
                        } else {
                            0.0
                        };
                        nodes[node.index()][phase.index()] = Phasor {
                            magnitude: x.norm(),
                            angle_deg,
                        };
                    }
                }
            }
        }

        Ok(PhasorSet {
            quantity,
            estimator,
            nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_signals::SampleConfig;
    use pf_signals::synth::demo_set;

    #[test]
    fn balanced_voltage_phasors_are_120_apart() {
        let s = demo_set(SampleConfig::default(), 2, 30.0).unwrap();
        let a = Analyzer::new(&s).unwrap();
        for estimator in [PhaseEstimator::PeakOffset, PhaseEstimator::Fundamental] {
            let set = a.voltage_phasors(estimator).unwrap();
            let n1 = set.get(Node::N1, Phase::A);
            assert!(n1.angle_deg.abs() < 1e-9);
            assert!((n1.magnitude - 120.0 * 2f64.sqrt()).abs() < 1e-6);
            // 120° is not a whole number of samples; allow one sample of slack.
            assert!((set.get(Node::N1, Phase::B).angle_deg + 120.0).abs() < 3.6);
            assert!((set.get(Node::N1, Phase::C).angle_deg - 120.0).abs() < 3.6);
        }
    }

    #[test]
    fn currents_lag_by_load_angle() {
        let s = demo_set(SampleConfig::default(), 2, 36.0).unwrap();
        let a = Analyzer::new(&s).unwrap();
        let peak = a.current_phasors(PhaseEstimator::PeakOffset).unwrap();
        let fund = a.current_phasors(PhaseEstimator::Fundamental).unwrap();
        assert!((peak.get(Node::N2, Phase::A).angle_deg + 36.0).abs() < 1e-9);
        assert!((fund.get(Node::N2, Phase::A).angle_deg + 36.0).abs() < 1e-9);
        assert!((fund.get(Node::N2, Phase::A).magnitude - 8.0 * 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(fund.quantity, Quantity::Current);
    }

    #[test]
    fn node4_phasors_are_present() {
        let s = demo_set(SampleConfig::default(), 2, 0.0).unwrap();
        let a = Analyzer::new(&s).unwrap();
        let set = a.voltage_phasors(PhaseEstimator::Fundamental).unwrap();
        let v4 = set.get(Node::N4, Phase::A);
        // Bus voltage sits close to the stiffest feeder (node 1, 120 V RMS).
        assert!(v4.magnitude > 110.0 * 2f64.sqrt());
        assert!(v4.angle_deg.abs() < 5.0);
    }
}
