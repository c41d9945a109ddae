//! Sampling timebase shared by every waveform of a signal set.
//!
//! All waveforms are sampled synchronously at `samples_per_cycle` points per
//! cycle of the fundamental, so the sample period is
//! `dt = 1 / (samples_per_cycle * F)`.

use pf_core::constants::{SAMPLES_PER_CYCLE, f_nominal};
use pf_core::units::{Frequency, Time, hz, s};
use std::f64::consts::PI;
use uom::si::frequency::hertz;

use crate::error::{SignalError, SignalResult};

/// Sample configuration for a signal set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConfig {
    /// Fundamental frequency.
    pub fundamental: Frequency,
    /// Samples taken per fundamental cycle.
    pub samples_per_cycle: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            fundamental: f_nominal(),
            samples_per_cycle: SAMPLES_PER_CYCLE,
        }
    }
}

impl SampleConfig {
    /// Create a new sample configuration.
    ///
    /// # Arguments
    ///
    /// * `frequency_hz` - Fundamental frequency in Hz (must be positive and finite)
    /// * `samples_per_cycle` - Samples per fundamental cycle (must be at least 2)
    pub fn new(frequency_hz: f64, samples_per_cycle: usize) -> SignalResult<Self> {
        if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
            return Err(SignalError::InvalidSampling {
                what: "fundamental frequency must be positive",
            });
        }
        if samples_per_cycle < 2 {
            return Err(SignalError::InvalidSampling {
                what: "at least two samples per cycle are required",
            });
        }
        Ok(Self {
            fundamental: hz(frequency_hz),
            samples_per_cycle,
        })
    }

    /// Fundamental frequency in Hz.
    pub fn frequency_hz(&self) -> f64 {
        self.fundamental.get::<hertz>()
    }

    /// Sample rate in Hz.
    pub fn sample_rate_hz(&self) -> f64 {
        self.frequency_hz() * self.samples_per_cycle as f64
    }

    /// Sample period.
    pub fn sample_period(&self) -> Time {
        s(self.dt_s())
    }

    /// Sample period in seconds.
    pub fn dt_s(&self) -> f64 {
        1.0 / self.sample_rate_hz()
    }

    /// Angular frequency of the fundamental in rad/s.
    pub fn omega(&self) -> f64 {
        2.0 * PI * self.frequency_hz()
    }

    /// Electrical angle covered by `offset` samples, in radians.
    pub fn samples_to_radians(&self, offset: f64) -> f64 {
        offset * self.dt_s() * self.omega()
    }

    /// Electrical angle covered by `offset` samples, in degrees.
    pub fn samples_to_degrees(&self, offset: f64) -> f64 {
        self.samples_to_radians(offset) * 180.0 / PI
    }

    /// Sample instants `k * dt` for `n` samples.
    pub fn time_axis(&self, n: usize) -> Vec<f64> {
        let dt = self.dt_s();
        (0..n).map(|k| k as f64 * dt).collect()
    }

    /// Number of samples spanning `cycles` full cycles.
    pub fn samples_for_cycles(&self, cycles: usize) -> usize {
        cycles * self.samples_per_cycle
    }
}
