//! Shared application service layer for powerflow.
//!
//! Sits between the analysis crates and the front ends: reads signal files,
//! turns them into validated signal sets, runs an analysis session and
//! bundles every table into one serializable report.

pub mod error;
pub mod report;
pub mod schema;
pub mod signal_service;

pub use error::{AppError, AppResult};
pub use report::{AnalysisReport, Node4Summary, SamplingSummary, build_report, render_text};
pub use schema::{ComplexDef, ImpedancesDef, NodeDef, SamplingDef, SignalFile};
pub use signal_service::{
    FileFormat, load_signal_file, load_signal_set, save_signal_file, validate_signal_file,
};
