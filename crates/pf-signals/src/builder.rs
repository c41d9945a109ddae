//! Incremental signal-set builder.

use pf_core::Node;

use crate::error::{SignalError, SignalResult};
use crate::impedance::LineImpedances;
use crate::sampling::SampleConfig;
use crate::signal_set::{NodeSignals, SignalSet};

/// Builder for assembling a signal set node by node.
///
/// Use `node` / `node_rows` to supply waveforms for nodes 1..=3, optionally
/// override impedances and sampling, then call `build()` to validate and
/// freeze everything into an immutable `SignalSet`.
#[derive(Debug, Default)]
pub struct SignalSetBuilder {
    nodes: [Option<NodeSignals>; 3],
    rows: Vec<(Node, [Vec<f64>; 3], [Vec<f64>; 3])>,
    impedances: Option<LineImpedances>,
    sampling: Option<SampleConfig>,
    rejected: Option<Node>,
}

impl SignalSetBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the waveforms of a measured node, replacing earlier ones.
    pub fn node(&mut self, node: Node, signals: NodeSignals) -> &mut Self {
        match self.nodes.get_mut(node.index()) {
            Some(slot) => {
                self.rows.retain(|(n, _, _)| *n != node);
                *slot = Some(signals);
            }
            None => self.rejected = Some(node),
        }
        self
    }

    /// Supply the waveforms of a measured node as per-phase rows.
    pub fn node_rows(
        &mut self,
        node: Node,
        voltage: [Vec<f64>; 3],
        current: [Vec<f64>; 3],
    ) -> &mut Self {
        if !node.is_measured() {
            self.rejected = Some(node);
            return self;
        }
        if let Some(slot) = self.nodes.get_mut(node.index()) {
            *slot = None;
        }
        self.rows.retain(|(n, _, _)| *n != node);
        self.rows.push((node, voltage, current));
        self
    }

    pub fn impedances(&mut self, impedances: LineImpedances) -> &mut Self {
        self.impedances = Some(impedances);
        self
    }

    pub fn sampling(&mut self, sampling: SampleConfig) -> &mut Self {
        self.sampling = Some(sampling);
        self
    }

    /// Validate and build the signal set.
    ///
    /// Impedances and sampling fall back to their defaults when unset.
    pub fn build(&self) -> SignalResult<SignalSet> {
        if let Some(node) = self.rejected {
            return Err(SignalError::NotMeasured { node });
        }

        let mut nodes: [Option<NodeSignals>; 3] = self.nodes.clone();
        for (node, voltage, current) in &self.rows {
            nodes[node.index()] = Some(NodeSignals::from_rows(
                *node,
                voltage.clone(),
                current.clone(),
            )?);
        }

        let [n1, n2, n3] = nodes;
        let take = |slot: Option<NodeSignals>, node: Node| {
            slot.ok_or(SignalError::MissingNode { node })
        };
        let nodes = [
            take(n1, Node::N1)?,
            take(n2, Node::N2)?,
            take(n3, Node::N3)?,
        ];

        SignalSet::new(
            nodes,
            self.impedances.unwrap_or_default(),
            self.sampling.unwrap_or_default(),
        )
    }
}
