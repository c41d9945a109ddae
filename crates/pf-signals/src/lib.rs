//! pf-signals: input data layer for powerflow.
//!
//! Provides:
//! - Per-node sampled voltage/current waveforms (3 phases × N samples)
//! - Line impedances between the measured nodes and the common bus
//! - Sampling configuration (fundamental frequency, samples per cycle)
//! - Incremental builder with shape validation
//! - Synthetic sinusoid generation for demos and tests
//!
//! # Example
//!
//! ```
//! use pf_core::Node;
//! use pf_signals::{SampleConfig, SignalSetBuilder};
//!
//! let row = vec![1.0, -1.0, 1.0, -1.0];
//! let rows = [row.clone(), row.clone(), row.clone()];
//!
//! let mut builder = SignalSetBuilder::new();
//! for node in Node::MEASURED {
//!     builder.node_rows(node, rows.clone(), rows.clone());
//! }
//! let set = builder.sampling(SampleConfig::new(60.0, 4).unwrap()).build().unwrap();
//!
//! assert_eq!(set.samples(), 4);
//! ```

pub mod builder;
pub mod error;
pub mod impedance;
pub mod sampling;
pub mod signal_set;
pub mod synth;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::SignalSetBuilder;
pub use error::{SignalError, SignalResult};
pub use impedance::LineImpedances;
pub use nalgebra::{Complex, DMatrix};
pub use sampling::SampleConfig;
pub use signal_set::{NodeSignals, SignalSet};
pub use synth::{SineWave, ThreePhaseSource};
