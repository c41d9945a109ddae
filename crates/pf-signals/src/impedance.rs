//! Line impedances between the measured nodes and the common bus.

use nalgebra::Complex;
use pf_core::Node;

use crate::error::{SignalError, SignalResult};

/// Below this magnitude the admittance sum is treated as zero.
const ADMITTANCE_EPS: f64 = 1e-12;

/// The three series impedances Zl1, Zl2, Zl3 (ohms) joining nodes 1..=3 to node 4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineImpedances {
    z: [Complex<f64>; 3],
}

impl Default for LineImpedances {
    /// Line parameters of the reference distribution segment.
    fn default() -> Self {
        Self {
            z: [
                Complex::new(0.009, 0.0),
                Complex::new(0.01, 0.0),
                Complex::new(0.01, 0.001),
            ],
        }
    }
}

impl LineImpedances {
    /// Create line impedances, rejecting zero or non-finite values.
    pub fn new(zl1: Complex<f64>, zl2: Complex<f64>, zl3: Complex<f64>) -> SignalResult<Self> {
        let z = [zl1, zl2, zl3];
        for (i, zi) in z.iter().enumerate() {
            if !(zi.re.is_finite() && zi.im.is_finite()) || zi.norm_sqr() == 0.0 {
                return Err(SignalError::ZeroImpedance { line: i + 1 });
            }
        }
        let lines = Self { z };
        lines.admittance_sum()?;
        Ok(lines)
    }

    /// Purely resistive lines.
    pub fn resistive(r1: f64, r2: f64, r3: f64) -> SignalResult<Self> {
        Self::new(
            Complex::new(r1, 0.0),
            Complex::new(r2, 0.0),
            Complex::new(r3, 0.0),
        )
    }

    /// Impedance of the line feeding node 4 from `node`.
    ///
    /// Returns `None` for node 4 itself.
    pub fn line(&self, node: Node) -> Option<Complex<f64>> {
        self.z.get(node.index()).copied()
    }

    pub fn as_array(&self) -> &[Complex<f64>; 3] {
        &self.z
    }

    /// Admittance of each line, 1/Zlk.
    pub fn admittances(&self) -> [Complex<f64>; 3] {
        self.z.map(|zi| zi.inv())
    }

    /// Y = 1/Zl1 + 1/Zl2 + 1/Zl3.
    pub fn admittance_sum(&self) -> SignalResult<Complex<f64>> {
        let y: Complex<f64> = self.admittances().iter().sum();
        if !(y.re.is_finite() && y.im.is_finite()) || y.norm() < ADMITTANCE_EPS {
            return Err(SignalError::DegenerateAdmittance);
        }
        Ok(y)
    }
}
