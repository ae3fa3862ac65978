//! Graph validation logic.

use petgraph::Direction;
use petgraph::visit::EdgeRef;

use crate::error::{FlowError, FlowResult};
use crate::graph::{FlowEdge, FlowGraph, NodeKind};

impl FlowGraph {
    /// Re-check the structural invariants.
    ///
    /// - material -> transformation edges carry `Consumes`
    /// - tool -> transformation edges carry `Requires`
    /// - transformation -> material edges carry `Produces`
    /// - every transformation produces exactly one material
    /// - no material is produced twice
    /// - the graph is acyclic
    pub fn validate(&self) -> FlowResult<()> {
        for e in self.graph.edge_references() {
            let from = self.graph[e.source()].kind();
            let to = self.graph[e.target()].kind();
            let ok = matches!(
                (from, to, e.weight()),
                (
                    NodeKind::Material,
                    NodeKind::Transformation,
                    FlowEdge::Consumes { .. }
                ) | (NodeKind::Tool, NodeKind::Transformation, FlowEdge::Requires)
                    | (NodeKind::Transformation, NodeKind::Material, FlowEdge::Produces)
            );
            if !ok {
                return Err(FlowError::Malformed {
                    what: format!(
                        "edge {} -> {} joins a {} to a {} with {:?}",
                        e.source().index(),
                        e.target().index(),
                        from.name(),
                        to.name(),
                        e.weight()
                    ),
                });
            }
        }

        for ix in self.graph.node_indices() {
            let kind = self.graph[ix].kind();
            let produced = self
                .graph
                .edges_directed(ix, Direction::Outgoing)
                .filter(|e| matches!(e.weight(), FlowEdge::Produces))
                .count();
            let produced_by = self
                .graph
                .edges_directed(ix, Direction::Incoming)
                .filter(|e| matches!(e.weight(), FlowEdge::Produces))
                .count();

            if kind == NodeKind::Transformation && produced != 1 {
                return Err(FlowError::Malformed {
                    what: format!(
                        "transformation {} produces {} materials (expected 1)",
                        ix.index(),
                        produced
                    ),
                });
            }
            if produced_by > 1 {
                return Err(FlowError::Malformed {
                    what: format!("material {} is produced {} times", ix.index(), produced_by),
                });
            }
        }

        self.topological_order()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{FlowNode, MaterialNode, TransformationNode};
    use saute_core::{MassUnit, Quantity, TimeUnit};

    fn material(graph: &mut FlowGraph, name: &str) -> petgraph::graph::NodeIndex {
        graph.graph.add_node(FlowNode::Material(MaterialNode {
            name: name.into(),
            quantity: Quantity::of(1.0, MassUnit::Grams).unwrap(),
        }))
    }

    fn transformation(graph: &mut FlowGraph, name: &str) -> petgraph::graph::NodeIndex {
        graph
            .graph
            .add_node(FlowNode::Transformation(TransformationNode {
                name: name.into(),
                description: String::new(),
                duration: Quantity::of(1.0, TimeUnit::Seconds).unwrap(),
            }))
    }

    #[test]
    fn validate_empty_graph() {
        assert!(FlowGraph::new().validate().is_ok());
    }

    #[test]
    fn validate_wrong_edge_kind() {
        let mut graph = FlowGraph::new();
        let a = material(&mut graph, "a");
        let b = material(&mut graph, "b");
        graph.graph.add_edge(a, b, FlowEdge::Produces);

        let err = graph.validate().unwrap_err();
        assert!(matches!(err, FlowError::Malformed { .. }));
    }

    #[test]
    fn validate_transformation_without_product() {
        let mut graph = FlowGraph::new();
        let a = material(&mut graph, "a");
        let op = transformation(&mut graph, "op");
        graph.graph.add_edge(
            a,
            op,
            FlowEdge::Consumes {
                quantity_used: Quantity::of(1.0, MassUnit::Grams).unwrap(),
            },
        );

        let err = graph.validate().unwrap_err();
        assert!(format!("{err}").contains("produces 0 materials"));
    }

    #[test]
    fn validate_detects_cycle() {
        let mut graph = FlowGraph::new();
        let a = material(&mut graph, "a");
        let op = transformation(&mut graph, "op");
        graph.graph.add_edge(
            a,
            op,
            FlowEdge::Consumes {
                quantity_used: Quantity::of(1.0, MassUnit::Grams).unwrap(),
            },
        );
        graph.graph.add_edge(op, a, FlowEdge::Produces);

        let err = graph.validate().unwrap_err();
        assert!(matches!(err, FlowError::Cycle { .. }));
        assert!(graph.topological_generations().is_err());
    }
}
