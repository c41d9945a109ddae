//! pf-core: stable foundation for powerflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, finiteness checks, result rounding)
//! - ids (node and phase identifiers, per-phase vectors)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PfError, PfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
