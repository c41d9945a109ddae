//! RMS values.
//!
//! Line RMS is the plain root-mean-square of a waveform. Phase RMS divides
//! the waveform by √3 first (line-to-neutral view) and feeds the RMS summary
//! table rows of nodes 1..=3 and the impedance magnitudes.

use nalgebra::{Complex, DMatrix};
use pf_core::{Node, Phase, PhaseValues, round_result};

use crate::analyzer::Analyzer;
use crate::error::{AnalysisError, AnalysisResult, finite};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// sqrt(mean(x²)) of one row of a 3 × N matrix.
pub fn row_rms(m: &DMatrix<f64>, phase: Phase) -> Option<f64> {
    let n = m.ncols();
    if n == 0 {
        return None;
    }
    Some((m.row(phase.index()).norm_squared() / n as f64).sqrt())
}

/// sqrt(mean(|z|²)) of one row of a complex 3 × N matrix.
pub fn row_rms_complex(m: &DMatrix<Complex<f64>>, phase: Phase) -> Option<f64> {
    let n = m.ncols();
    if n == 0 {
        return None;
    }
    let sum: f64 = m.row(phase.index()).iter().map(|z| z.norm_sqr()).sum();
    Some((sum / n as f64).sqrt())
}

impl Analyzer<'_> {
    /// Unrounded line RMS voltage of one phase. Node 4 uses |V4|.
    pub fn line_rms_voltage(&self, node: Node, phase: Phase) -> AnalysisResult<f64> {
        let rms = match node {
            Node::N4 => row_rms_complex(&self.node4_voltage()?, phase),
            _ => row_rms(&self.measured(node)?.voltage, phase),
        }
        .ok_or(AnalysisError::degenerate(node, phase, "empty waveform"))?;
        finite(rms, "RMS voltage")
    }

    /// Unrounded line RMS current of one phase. Node 4 uses I4 = I1+I2+I3.
    pub fn line_rms_current(&self, node: Node, phase: Phase) -> AnalysisResult<f64> {
        let rms = match node {
            Node::N4 => row_rms(&self.node4_current()?, phase),
            _ => row_rms(&self.measured(node)?.current, phase),
        }
        .ok_or(AnalysisError::degenerate(node, phase, "empty waveform"))?;
        finite(rms, "RMS current")
    }

    /// Per-phase line RMS voltage, rounded to 4 digits.
    pub fn rms_voltage(&self, node: Node) -> AnalysisResult<PhaseValues> {
        if node == Node::N4 {
            // Solve once for all three phases.
            let v4 = self.node4_voltage()?;
            return PhaseValues::try_from_fn(|p| {
                let rms = row_rms_complex(&v4, p)
                    .ok_or(AnalysisError::degenerate(node, p, "empty waveform"))?;
                finite(round_result(rms), "RMS voltage")
            });
        }
        PhaseValues::try_from_fn(|p| self.line_rms_voltage(node, p).map(round_result))
    }

    /// Per-phase line RMS current, rounded to 4 digits.
    pub fn rms_current(&self, node: Node) -> AnalysisResult<PhaseValues> {
        PhaseValues::try_from_fn(|p| self.line_rms_current(node, p).map(round_result))
    }

    /// Phase (line-to-neutral) RMS voltage: RMS of the waveform divided by √3.
    pub fn phase_rms(&self, node: Node, phase: Phase) -> AnalysisResult<f64> {
        Ok(self.line_rms_voltage(node, phase)? / SQRT_3)
    }

    /// Phase (line-to-neutral) RMS current: RMS of the waveform divided by √3.
    pub fn phase_rms_current(&self, node: Node, phase: Phase) -> AnalysisResult<f64> {
        Ok(self.line_rms_current(node, phase)? / SQRT_3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_signals::synth::{SineWave, demo_set};
    use pf_signals::{LineImpedances, NodeSignals, SampleConfig, SignalSet};

    fn constant_set(v: f64, i: f64) -> SignalSet {
        let node = || {
            NodeSignals::new(
                DMatrix::from_element(3, 10, v),
                DMatrix::from_element(3, 10, i),
            )
        };
        SignalSet::new(
            [node(), node(), node()],
            LineImpedances::default(),
            SampleConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn rms_of_constant_is_magnitude() {
        let set = constant_set(-3.0, 2.0);
        let a = Analyzer::new(&set).unwrap();
        assert_eq!(
            a.rms_voltage(Node::N1).unwrap(),
            PhaseValues::new(3.0, 3.0, 3.0)
        );
        assert_eq!(
            a.rms_current(Node::N3).unwrap(),
            PhaseValues::new(2.0, 2.0, 2.0)
        );
    }

    #[test]
    fn sine_rms_is_peak_over_root_two() {
        let sampling = SampleConfig::default();
        let w = SineWave::new(10.0, 17.0).sample(&sampling, 300);
        let m = DMatrix::from_fn(3, 300, |_, c| w[c]);
        let rms = row_rms(&m, Phase::B).unwrap();
        assert!((rms - 10.0 / 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn phase_rms_divides_by_root_three() {
        let set = demo_set(SampleConfig::default(), 2, 10.0).unwrap();
        let a = Analyzer::new(&set).unwrap();
        let line = a.line_rms_voltage(Node::N2, Phase::A).unwrap();
        let phase = a.phase_rms(Node::N2, Phase::A).unwrap();
        assert!((line / phase - 3f64.sqrt()).abs() < 1e-12);
        let line_i = a.line_rms_current(Node::N2, Phase::A).unwrap();
        let phase_i = a.phase_rms_current(Node::N2, Phase::A).unwrap();
        assert!((line_i / phase_i - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn node4_rms_is_available() {
        let set = constant_set(100.0, 0.0);
        let a = Analyzer::new(&set).unwrap();
        // No injection and equal node voltages: V4 equals the common voltage.
        let v4 = a.rms_voltage(Node::N4).unwrap();
        for (_, v) in v4.iter() {
            assert!((v - 100.0).abs() < 1e-6);
        }
        assert_eq!(a.rms_current(Node::N4).unwrap(), PhaseValues::default());
    }

    #[test]
    fn empty_row_has_no_rms() {
        let m = DMatrix::<f64>::zeros(3, 0);
        assert_eq!(row_rms(&m, Phase::A), None);
    }
}
