//! Flow-graph error types.

use saute_core::{Quantity, UnitError};
use thiserror::Error;

pub type FlowResult<T> = Result<T, FlowError>;

/// Flow graph construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// A transformation asked for more of a consumable material than is on hand.
    #[error("Not enough {material} (requires {requested}, has {available})")]
    InsufficientStock {
        material: String,
        requested: Quantity,
        available: Quantity,
    },

    /// A handle does not name a node of the expected kind in this graph.
    #[error("Unknown {what} node {index}")]
    UnknownNode { what: &'static str, index: usize },

    #[error("Material {material} listed more than once as an input")]
    DuplicateInput { material: String },

    #[error("Negative amount requested for {material}: {requested}")]
    NegativeRequest {
        material: String,
        requested: Quantity,
    },

    /// Structural invariant broken (reported by `validate`).
    #[error("Malformed flow graph: {what}")]
    Malformed { what: String },

    #[error("Flow graph contains a cycle through node {index}")]
    Cycle { index: usize },
}
