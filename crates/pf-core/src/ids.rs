use core::fmt;
use core::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bus of the four-node distribution segment.
///
/// Nodes 1..=3 are measured. Node 4 is the common bus whose voltage is
/// reconstructed from the line impedances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    N1,
    N2,
    N3,
    N4,
}

impl Node {
    pub const MEASURED: [Node; 3] = [Node::N1, Node::N2, Node::N3];
    pub const ALL: [Node; 4] = [Node::N1, Node::N2, Node::N3, Node::N4];

    /// 0-based index (N1 -> 0).
    pub fn index(self) -> usize {
        match self {
            Node::N1 => 0,
            Node::N2 => 1,
            Node::N3 => 2,
            Node::N4 => 3,
        }
    }

    /// Inverse of [`Node::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 1-based node number as printed in tables.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn is_measured(self) -> bool {
        !matches!(self, Node::N4)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("node {}", self.number()))
    }
}

/// Phase conductor. Rows of every 3×N waveform matrix follow this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    pub fn index(self) -> usize {
        match self {
            Phase::A => 0,
            Phase::B => 1,
            Phase::C => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
        };
        f.write_str(s)
    }
}

/// One value per phase, indexable by [`Phase`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseValues(pub [f64; 3]);

impl PhaseValues {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self([a, b, c])
    }

    pub fn from_fn(mut f: impl FnMut(Phase) -> f64) -> Self {
        Self([f(Phase::A), f(Phase::B), f(Phase::C)])
    }

    /// Fallible variant of [`PhaseValues::from_fn`]; stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(Phase) -> Result<f64, E>) -> Result<Self, E> {
        Ok(Self([f(Phase::A)?, f(Phase::B)?, f(Phase::C)?]))
    }

    pub fn map(self, f: impl FnMut(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, f64)> + '_ {
        Phase::ALL.iter().map(move |&p| (p, self[p]))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[f64; 3] {
        &self.0
    }
}

impl Index<Phase> for PhaseValues {
    type Output = f64;

    fn index(&self, phase: Phase) -> &f64 {
        &self.0[phase.index()]
    }
}

impl IndexMut<Phase> for PhaseValues {
    fn index_mut(&mut self, phase: Phase) -> &mut f64 {
        &mut self.0[phase.index()]
    }
}
