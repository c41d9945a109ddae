//! Node-4 reconstruction by nodal analysis.
//!
//! Node 4 joins nodes 1..=3 through Zl1, Zl2, Zl3. With the injected current
//! I4 = I1 + I2 + I3 and Y = Σ 1/Zlk, KCL at the bus gives
//!
//! ```text
//! V4 · Y = I4 + V1/Zl1 + V2/Zl2 + V3/Zl3
//! ```
//!
//! solved sample by sample for every phase.

use nalgebra::{Complex, DMatrix};

use crate::analyzer::Analyzer;
use crate::error::{AnalysisError, AnalysisResult};

impl Analyzer<'_> {
    /// I4 = I1 + I2 + I3, phase-aligned and sample-aligned (3 × N).
    pub fn node4_current(&self) -> AnalysisResult<DMatrix<f64>> {
        let [n1, n2, n3] = self.signals().nodes();
        let i4 = &n1.current + &n2.current + &n3.current;
        ensure_all_finite(i4.iter().copied(), "node 4 current")?;
        Ok(i4)
    }

    /// Injection term I4 + V1/Zl1 + V2/Zl2 + V3/Zl3 (3 × N).
    fn bus_injection(&self, i4: &DMatrix<f64>) -> DMatrix<Complex<f64>> {
        let nodes = self.signals().nodes();
        let y = self.signals().impedances().admittances();
        DMatrix::from_fn(i4.nrows(), i4.ncols(), |r, c| {
            nodes
                .iter()
                .zip(y.iter())
                .fold(Complex::new(i4[(r, c)], 0.0), |acc, (node, yk)| {
                    acc + *yk * node.voltage[(r, c)]
                })
        })
    }

    /// V4 = (I4 + V1/Zl1 + V2/Zl2 + V3/Zl3) / Y (complex 3 × N).
    pub fn node4_voltage(&self) -> AnalysisResult<DMatrix<Complex<f64>>> {
        let i4 = self.node4_current()?;
        let y = self.admittance();
        let v4 = self.bus_injection(&i4).map(|z| z / y);
        ensure_all_finite(v4.iter().flat_map(|z| [z.re, z.im]), "node 4 voltage")?;
        tracing::debug!(samples = v4.ncols(), "solved node 4 voltage");
        Ok(v4)
    }

    /// I4 + V1/Zl1 + V2/Zl2 + V3/Zl3 − V4·Y, zero up to rounding.
    pub fn kcl_residual(&self) -> AnalysisResult<DMatrix<Complex<f64>>> {
        let i4 = self.node4_current()?;
        let v4 = self.node4_voltage()?;
        let y = self.admittance();
        Ok(self.bus_injection(&i4) - v4.map(|z| z * y))
    }
}

fn ensure_all_finite(
    mut values: impl Iterator<Item = f64>,
    what: &'static str,
) -> AnalysisResult<()> {
    match values.find(|v| !v.is_finite()) {
        Some(value) => Err(AnalysisError::NumericOverflow { what, value }),
        None => Ok(()),
    }
}
