//! Steady-state analysis of a three-phase, four-node distribution segment.
//!
//! This crate derives RMS values, the node-4 bus voltage, instantaneous,
//! active, reactive and apparent power, power factor and load impedance
//! from the sampled waveforms of a [`pf_signals::SignalSet`].
//!
//! Node 4 is not measured. Its voltage follows from Kirchhoff's current law
//! at the common bus (Millman's theorem):
//!
//! ```text
//! I4 = I1 + I2 + I3
//! Y  = 1/Zl1 + 1/Zl2 + 1/Zl3
//! V4 = (I4 + V1/Zl1 + V2/Zl2 + V3/Zl3) / Y
//! ```
//!
//! Every [`Analyzer`] operation is a pure function of the borrowed signals
//! and may be called in any order, any number of times.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod impedance;
pub mod node4;
pub mod phase;
pub mod phasor;
pub mod power;
pub mod rms;
pub mod summary;

pub use analyzer::Analyzer;
pub use config::{AnalysisConfig, PhaseEstimator};
pub use error::{AnalysisError, AnalysisResult};
pub use impedance::{ImpedanceEstimate, ImpedanceTable};
pub use phasor::{Phasor, PhasorSet, Quantity};
pub use power::InstantaneousPowerTable;
pub use summary::{NodePower, PowerSummary, PowerTotals, RmsLineRow, RmsLineTable, RmsSummary};
