//! Arena handles.

use serde::Serialize;
use smallvec::SmallVec;

/// Index of a node in a `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Ordered children of a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeList {
    pub nodes: SmallVec<[NodeIndex; 4]>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child at `index`, or `NodeIndex::NONE`.
    #[inline]
    pub fn get(&self, index: usize) -> NodeIndex {
        self.nodes.get(index).copied().unwrap_or(NodeIndex::NONE)
    }

    pub fn position(&self, child: NodeIndex) -> Option<usize> {
        self.nodes.iter().position(|&n| n == child)
    }
}

impl From<Vec<NodeIndex>> for NodeList {
    fn from(nodes: Vec<NodeIndex>) -> Self {
        NodeList {
            nodes: SmallVec::from_vec(nodes),
        }
    }
}
