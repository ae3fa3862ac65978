//! Topological traversal for downstream consumers.
//!
//! The graph is acyclic by construction, so these only fail if a caller
//! somehow produced a cycle.

use petgraph::Direction;
use petgraph::algo::toposort;

use crate::error::{FlowError, FlowResult};
use crate::graph::FlowGraph;
use crate::ids::NodeId;

impl FlowGraph {
    /// Nodes ordered so every edge points forward.
    pub fn topological_order(&self) -> FlowResult<Vec<NodeId>> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(NodeId::from).collect())
            .map_err(|cycle| FlowError::Cycle {
                index: cycle.node_id().index(),
            })
    }

    /// Nodes grouped into layers: layer 0 has no predecessors, layer `k`
    /// contains nodes whose predecessors all sit in earlier layers.
    ///
    /// Nodes within a layer are sorted by handle for determinism.
    pub fn topological_generations(&self) -> FlowResult<Vec<Vec<NodeId>>> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|ix| {
                self.graph
                    .neighbors_directed(ix, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut current: Vec<NodeId> = self
            .graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] == 0)
            .map(NodeId::from)
            .collect();

        let mut generations = Vec::new();
        let mut visited = 0;

        while !current.is_empty() {
            visited += current.len();
            let mut next = Vec::new();
            for node in &current {
                for succ in self
                    .graph
                    .neighbors_directed(node.raw(), Direction::Outgoing)
                {
                    let deg = &mut in_degree[succ.index()];
                    *deg -= 1;
                    if *deg == 0 {
                        next.push(NodeId::from(succ));
                    }
                }
            }
            next.sort();
            next.dedup();
            generations.push(current);
            current = next;
        }

        if visited != self.graph.node_count() {
            let stuck = in_degree.iter().position(|&d| d > 0).unwrap_or(0);
            return Err(FlowError::Cycle { index: stuck });
        }

        Ok(generations)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{ProductSpec, TransformationRequest};
    use crate::graph::FlowGraph;
    use saute_core::{MassUnit, Quantity, UnitCategory};

    #[test]
    fn empty_graph_orders() {
        let graph = FlowGraph::new();
        assert!(graph.topological_order().unwrap().is_empty());
        assert!(graph.topological_generations().unwrap().is_empty());
    }

    #[test]
    fn generations_follow_flow() {
        let mut graph = FlowGraph::new();
        let flour = graph
            .add_material("flour", 500.0, "grams", UnitCategory::Mass)
            .unwrap();
        let bowl = graph.add_tool("bowl");
        let out = graph
            .add_transformation(
                TransformationRequest::new("mix", "", 5.0, "minutes")
                    .input(flour, Quantity::of(400.0, MassUnit::Grams).unwrap())
                    .tool(bowl)
                    .product(ProductSpec::named("dough").with_amount(
                        400.0,
                        "grams",
                        UnitCategory::Mass,
                    )),
            )
            .unwrap();

        let generations = graph.topological_generations().unwrap();
        assert_eq!(generations.len(), 3);
        assert_eq!(generations[0], vec![flour.node(), bowl.node()]);
        assert_eq!(generations[1], vec![out.transformation.node()]);
        assert_eq!(generations[2], vec![out.product.node()]);

        let order = graph.topological_order().unwrap();
        let pos = |n| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(flour.node()) < pos(out.transformation.node()));
        assert!(pos(bowl.node()) < pos(out.transformation.node()));
        assert!(pos(out.transformation.node()) < pos(out.product.node()));
    }
}
