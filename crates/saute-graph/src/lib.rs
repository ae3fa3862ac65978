//! saute-graph: resource flow graph for saute.
//!
//! Provides:
//! - Node and edge types (materials, tools, transformations)
//! - Transactional construction with stock accounting
//! - Structural validation and topological traversal
//!
//! # Example
//!
//! ```
//! use saute_core::{MassUnit, Quantity, UnitCategory};
//! use saute_graph::{FlowGraph, ProductSpec, TransformationRequest};
//!
//! let mut graph = FlowGraph::new();
//! let flour = graph.add_material("flour", 500.0, "grams", UnitCategory::Mass).unwrap();
//! let bowl = graph.add_tool("mixing bowl");
//! let out = graph
//!     .add_transformation(
//!         TransformationRequest::new("mix", "Mix the dough", 5.0, "minutes")
//!             .input(flour, Quantity::of(400.0, MassUnit::Grams).unwrap())
//!             .tool(bowl)
//!             .product(ProductSpec::named("dough").with_amount(
//!                 500.0,
//!                 "grams",
//!                 UnitCategory::Mass,
//!             )),
//!     )
//!     .unwrap();
//!
//! assert_eq!(graph.material(flour).unwrap().quantity.magnitude(), 100.0);
//! assert_eq!(out.remaining, vec![flour]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod ids;
pub mod order;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{ProductAmount, ProductSpec, TransformationOutcome, TransformationRequest};
pub use error::{FlowError, FlowResult};
pub use graph::{
    EdgeView, FlowEdge, FlowGraph, FlowNode, MaterialNode, NodeKind, ToolNode, TransformationNode,
};
pub use ids::{MaterialId, NodeId, ToolId, TransformationId};
