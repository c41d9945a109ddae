//! Synthetic sinusoid generation.
//!
//! Produces ideal fundamental-frequency waveforms on a [`SampleConfig`]
//! timebase. Used by the demo command and throughout the test suites.

use nalgebra::DMatrix;
use std::f64::consts::SQRT_2;

use crate::error::SignalResult;
use crate::impedance::LineImpedances;
use crate::sampling::SampleConfig;
use crate::signal_set::{NodeSignals, SignalSet};

/// `amplitude * cos(ω t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineWave {
    /// Peak value.
    pub amplitude: f64,
    /// Phase in degrees.
    pub phase_deg: f64,
}

impl SineWave {
    pub fn new(amplitude: f64, phase_deg: f64) -> Self {
        Self {
            amplitude,
            phase_deg,
        }
    }

    /// Wave with the given RMS value.
    pub fn from_rms(rms: f64, phase_deg: f64) -> Self {
        Self::new(rms * SQRT_2, phase_deg)
    }

    pub fn sample(&self, sampling: &SampleConfig, n: usize) -> Vec<f64> {
        let omega = sampling.omega();
        let phase = self.phase_deg.to_radians();
        sampling
            .time_axis(n)
            .into_iter()
            .map(|t| self.amplitude * (omega * t + phase).cos())
            .collect()
    }
}

/// Balanced positive-sequence set: phase B lags A by 120°, C leads A by 120°.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePhaseSource {
    /// Peak value of every phase.
    pub amplitude: f64,
    /// Phase-A angle in degrees.
    pub phase_deg: f64,
}

impl ThreePhaseSource {
    pub fn new(amplitude: f64, phase_deg: f64) -> Self {
        Self {
            amplitude,
            phase_deg,
        }
    }

    pub fn from_rms(rms: f64, phase_deg: f64) -> Self {
        Self::new(rms * SQRT_2, phase_deg)
    }

    /// The three phase waves A, B, C.
    pub fn phases(&self) -> [SineWave; 3] {
        [0.0, -120.0, 120.0].map(|shift| SineWave::new(self.amplitude, self.phase_deg + shift))
    }

    pub fn rows(&self, sampling: &SampleConfig, n: usize) -> [Vec<f64>; 3] {
        self.phases().map(|w| w.sample(sampling, n))
    }
}

/// Node with balanced voltage and current sets over `cycles` full cycles.
pub fn balanced_node(
    voltage: ThreePhaseSource,
    current: ThreePhaseSource,
    sampling: &SampleConfig,
    cycles: usize,
) -> NodeSignals {
    let n = sampling.samples_for_cycles(cycles);
    let v = voltage.rows(sampling, n);
    let i = current.rows(sampling, n);
    NodeSignals::new(
        DMatrix::from_fn(3, n, |r, c| v[r][c]),
        DMatrix::from_fn(3, n, |r, c| i[r][c]),
    )
}

/// Three balanced nodes with slightly different loading, each current
/// lagging its voltage by `load_angle_deg`, on the reference line impedances.
pub fn demo_set(
    sampling: SampleConfig,
    cycles: usize,
    load_angle_deg: f64,
) -> SignalResult<SignalSet> {
    let loads = [(120.0, 10.0), (119.5, 8.0), (119.0, 12.0)];
    let nodes = loads.map(|(v_rms, i_rms)| {
        balanced_node(
            ThreePhaseSource::from_rms(v_rms, 0.0),
            ThreePhaseSource::from_rms(i_rms, -load_angle_deg),
            &sampling,
            cycles,
        )
    });
    tracing::debug!(cycles, load_angle_deg, "generated demo signal set");
    SignalSet::new(nodes, LineImpedances::default(), sampling)
}
