//! Shape validation for signal sets.

use pf_core::Node;

use crate::error::{SignalError, SignalResult};
use crate::signal_set::NodeSignals;

const PHASES: usize = 3;

/// Check that every waveform is 3 × N with one shared, non-zero N.
///
/// Returns N.
pub(crate) fn validate_shape(nodes: &[NodeSignals; 3]) -> SignalResult<usize> {
    let samples = nodes[0].voltage.ncols();

    for (node, signals) in Node::MEASURED.into_iter().zip(nodes) {
        for (what, m) in [
            ("voltage phase count", &signals.voltage),
            ("current phase count", &signals.current),
        ] {
            if m.nrows() != PHASES {
                return Err(SignalError::ShapeMismatch {
                    node,
                    what,
                    expected: PHASES,
                    actual: m.nrows(),
                });
            }
        }

        if signals.voltage.ncols() == 0 || signals.current.ncols() == 0 {
            return Err(SignalError::EmptyWaveform { node });
        }

        for (what, m) in [
            ("voltage sample count", &signals.voltage),
            ("current sample count", &signals.current),
        ] {
            if m.ncols() != samples {
                return Err(SignalError::ShapeMismatch {
                    node,
                    what,
                    expected: samples,
                    actual: m.ncols(),
                });
            }
        }
    }

    Ok(samples)
}
