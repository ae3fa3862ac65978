//! Stable handles into the flow graph arena.
//!
//! Every node lives in one arena; a handle is its index. Typed handles keep
//! a tool from being passed where a material is expected.

use core::fmt;

use petgraph::graph::NodeIndex;

/// Untyped handle to any node in the graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NodeIndex);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        Self(NodeIndex::new(index))
    }

    pub fn index(self) -> usize {
        self.0.index()
    }

    pub(crate) fn raw(self) -> NodeIndex {
        self.0
    }
}

impl From<NodeIndex> for NodeId {
    fn from(ix: NodeIndex) -> Self {
        Self(ix)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Handle to a material (resource) node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) NodeId);

/// Handle to a tool node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolId(pub(crate) NodeId);

/// Handle to a transformation node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformationId(pub(crate) NodeId);

impl MaterialId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

impl ToolId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

impl TransformationId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

impl From<MaterialId> for NodeId {
    fn from(id: MaterialId) -> Self {
        id.0
    }
}

impl From<ToolId> for NodeId {
    fn from(id: ToolId) -> Self {
        id.0
    }
}

impl From<TransformationId> for NodeId {
    fn from(id: TransformationId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            let id = NodeId::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn typed_handles_share_node_index() {
        let node = NodeId::from_index(7);
        let material = MaterialId(node);
        assert_eq!(NodeId::from(material), node);
        assert_eq!(format!("{:?}", node), "NodeId(7)");
        assert_eq!(node.to_string(), "7");
    }
}
