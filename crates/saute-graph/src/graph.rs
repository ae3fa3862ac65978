//! Core flow-graph data structures.

use core::fmt;

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use saute_core::{Quantity, Tolerances};

use crate::error::{FlowError, FlowResult};
use crate::ids::{MaterialId, NodeId, ToolId, TransformationId};

/// A material: raw stock or the product of a transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialNode {
    pub name: String,
    /// Stock on hand. Replaced wholesale whenever the material is consumed.
    pub quantity: Quantity,
}

impl MaterialNode {
    /// Non-consumable materials never deplete.
    pub fn is_available(&self) -> bool {
        !self.quantity.category().is_consumable() || self.quantity.is_positive()
    }
}

/// Reusable equipment. Never consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolNode {
    pub name: String,
}

/// A discrete unit of work. Immutable once added.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationNode {
    pub name: String,
    pub description: String,
    pub duration: Quantity,
}

/// Kind tag for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Material,
    Tool,
    Transformation,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Tool => "tool",
            Self::Transformation => "transformation",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowNode {
    Material(MaterialNode),
    Tool(ToolNode),
    Transformation(TransformationNode),
}

impl FlowNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Material(_) => NodeKind::Material,
            Self::Tool(_) => NodeKind::Tool,
            Self::Transformation(_) => NodeKind::Transformation,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Material(m) => &m.name,
            Self::Tool(t) => &t.name,
            Self::Transformation(t) => &t.name,
        }
    }
}

/// Edge payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEdge {
    /// material -> transformation, carrying the amount requested.
    Consumes { quantity_used: Quantity },
    /// tool -> transformation.
    Requires,
    /// transformation -> material.
    Produces,
}

impl FlowEdge {
    pub fn quantity_used(&self) -> Option<&Quantity> {
        match self {
            Self::Consumes { quantity_used } => Some(quantity_used),
            Self::Requires | Self::Produces => None,
        }
    }
}

/// Read-only view of one edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub from: NodeId,
    pub to: NodeId,
    pub edge: &'a FlowEdge,
}

impl fmt::Display for MaterialNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.quantity, self.name)
    }
}

impl fmt::Display for ToolNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tool: {}", self.name)
    }
}

impl fmt::Display for TransformationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transformation: {} ({})", self.name, self.duration)
    }
}

impl fmt::Display for FlowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Material(m) => fmt::Display::fmt(m, f),
            Self::Tool(t) => fmt::Display::fmt(t, f),
            Self::Transformation(t) => fmt::Display::fmt(t, f),
        }
    }
}

/// The resource flow graph.
///
/// All nodes live in one `petgraph` arena and are addressed by stable
/// handles, so decrementing a material is visible through every edge that
/// touches it. Nodes are only ever appended and every edge points at a node
/// that already existed, which keeps the graph acyclic.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub(crate) graph: DiGraph<FlowNode, FlowEdge>,
    /// Next suffix for auto-named products.
    pub(crate) intermediate_counter: u64,
    pub(crate) tolerances: Tolerances,
}

impl FlowGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph that zeroes leftover stock within `tolerances.abs` of empty.
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            tolerances,
            ..Self::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get a node by handle (returns None if out of bounds).
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&FlowNode> {
        self.graph.node_weight(id.into().raw())
    }

    pub fn material(&self, id: MaterialId) -> Option<&MaterialNode> {
        match self.node(id)? {
            FlowNode::Material(m) => Some(m),
            _ => None,
        }
    }

    pub fn tool(&self, id: ToolId) -> Option<&ToolNode> {
        match self.node(id)? {
            FlowNode::Tool(t) => Some(t),
            _ => None,
        }
    }

    pub fn transformation(&self, id: TransformationId) -> Option<&TransformationNode> {
        match self.node(id)? {
            FlowNode::Transformation(t) => Some(t),
            _ => None,
        }
    }

    /// Whether a material still has stock (or is not depletable).
    pub fn is_available(&self, id: MaterialId) -> FlowResult<bool> {
        Ok(self.material_checked(id)?.is_available())
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &FlowNode)> + '_ {
        self.graph
            .node_indices()
            .map(move |ix| (NodeId::from(ix), &self.graph[ix]))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edge_references().map(|e| EdgeView {
            from: NodeId::from(e.source()),
            to: NodeId::from(e.target()),
            edge: e.weight(),
        })
    }

    /// The edge between two nodes, if any.
    pub fn edge(&self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Option<&FlowEdge> {
        let ix = self.graph.find_edge(from.into().raw(), to.into().raw())?;
        self.graph.edge_weight(ix)
    }

    /// `quantity_used` carried by a material -> transformation edge.
    pub fn edge_payload(
        &self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> Option<&Quantity> {
        self.edge(from, to)?.quantity_used()
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &MaterialNode)> + '_ {
        self.nodes().filter_map(|(id, node)| match node {
            FlowNode::Material(m) => Some((MaterialId(id), m)),
            _ => None,
        })
    }

    pub fn tools(&self) -> impl Iterator<Item = (ToolId, &ToolNode)> + '_ {
        self.nodes().filter_map(|(id, node)| match node {
            FlowNode::Tool(t) => Some((ToolId(id), t)),
            _ => None,
        })
    }

    pub fn transformations(
        &self,
    ) -> impl Iterator<Item = (TransformationId, &TransformationNode)> + '_ {
        self.nodes().filter_map(|(id, node)| match node {
            FlowNode::Transformation(t) => Some((TransformationId(id), t)),
            _ => None,
        })
    }

    /// One line per node, then one line per edge.
    pub fn listing(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.nodes().map(|(_, node)| node.to_string()).collect();
        for e in self.edges() {
            let from = &self.graph[e.from.raw()];
            let to = &self.graph[e.to.raw()];
            match e.edge.quantity_used() {
                Some(q) => lines.push(format!("{from} -> {to} (uses {q})")),
                None => lines.push(format!("{from} -> {to}")),
            }
        }
        lines
    }

    pub(crate) fn material_checked(&self, id: MaterialId) -> FlowResult<&MaterialNode> {
        self.material(id).ok_or(FlowError::UnknownNode {
            what: NodeKind::Material.name(),
            index: id.node().index(),
        })
    }

    pub(crate) fn ensure_tool(&self, id: ToolId) -> FlowResult<()> {
        match self.tool(id) {
            Some(_) => Ok(()),
            None => Err(FlowError::UnknownNode {
                what: NodeKind::Tool.name(),
                index: id.node().index(),
            }),
        }
    }
}
