//! Incremental flow-graph construction.
//!
//! `add_material` and `add_tool` register nodes; `add_transformation` is an
//! all-or-nothing transaction that checks every input before it deducts any
//! stock or touches the graph.

use std::collections::HashSet;

use saute_core::{CountUnit, Quantity, Real, UnitCategory, UnitError, snap_to_zero};
use tracing::{debug, info, warn};

use crate::error::{FlowError, FlowResult};
use crate::graph::{FlowEdge, FlowGraph, FlowNode, MaterialNode, ToolNode, TransformationNode};
use crate::ids::{MaterialId, NodeId, ToolId, TransformationId};

/// Amount of a product, given as unit name + category.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductAmount {
    pub magnitude: Real,
    pub unit: String,
    pub category: UnitCategory,
}

/// How the output of a transformation is named and measured.
///
/// Missing pieces fall back to an auto-generated `Intermediate_<N>` name and
/// a quantity of one piece.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSpec {
    pub name: Option<String>,
    pub amount: Option<ProductAmount>,
}

impl ProductSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            amount: None,
        }
    }

    pub fn with_amount(
        mut self,
        magnitude: Real,
        unit: impl Into<String>,
        category: UnitCategory,
    ) -> Self {
        self.amount = Some(ProductAmount {
            magnitude,
            unit: unit.into(),
            category,
        });
        self
    }
}

/// Everything needed to add one transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationRequest {
    pub name: String,
    pub description: String,
    pub duration: Real,
    pub duration_unit: String,
    /// Consumed materials, in the order they are checked and reported.
    pub inputs: Vec<(MaterialId, Quantity)>,
    pub tools: Vec<ToolId>,
    pub product: ProductSpec,
}

impl TransformationRequest {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        duration: Real,
        duration_unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            duration,
            duration_unit: duration_unit.into(),
            inputs: Vec::new(),
            tools: Vec::new(),
            product: ProductSpec::default(),
        }
    }

    pub fn input(mut self, material: MaterialId, quantity: Quantity) -> Self {
        self.inputs.push((material, quantity));
        self
    }

    pub fn tool(mut self, tool: ToolId) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn product(mut self, product: ProductSpec) -> Self {
        self.product = product;
        self
    }
}

/// Result of a successful `add_transformation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationOutcome {
    pub transformation: TransformationId,
    pub product: MaterialId,
    /// Inputs still available after the deduction, in request order.
    pub remaining: Vec<MaterialId>,
}

/// Stock update computed during validation and applied afterwards.
struct Deduction {
    material: MaterialId,
    quantity_used: Quantity,
    new_stock: Option<Quantity>,
}

impl FlowGraph {
    /// Declare initial stock of a material.
    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        magnitude: Real,
        unit: &str,
        category: UnitCategory,
    ) -> FlowResult<MaterialId> {
        let quantity = Quantity::new(magnitude, unit, category)?;
        Ok(self.add_material_quantity(name, quantity))
    }

    /// Declare initial stock from an already built quantity.
    pub fn add_material_quantity(
        &mut self,
        name: impl Into<String>,
        quantity: Quantity,
    ) -> MaterialId {
        let name = name.into();
        debug!(material = %name, %quantity, "add material");
        let ix = self.graph.add_node(FlowNode::Material(MaterialNode { name, quantity }));
        MaterialId(NodeId::from(ix))
    }

    /// Register a reusable tool.
    pub fn add_tool(&mut self, name: impl Into<String>) -> ToolId {
        let name = name.into();
        debug!(tool = %name, "add tool");
        let ix = self.graph.add_node(FlowNode::Tool(ToolNode { name }));
        ToolId(NodeId::from(ix))
    }

    /// Add a transformation, consume its inputs and create its product.
    ///
    /// Either every input check passes and all deductions apply, or the call
    /// fails and the graph is left exactly as it was.
    pub fn add_transformation(
        &mut self,
        request: TransformationRequest,
    ) -> FlowResult<TransformationOutcome> {
        let TransformationRequest {
            name,
            description,
            duration,
            duration_unit,
            inputs,
            tools,
            product,
        } = request;

        let duration = Quantity::new(duration, &duration_unit, UnitCategory::Time)?;
        let deductions = self.plan_deductions(&inputs)?;
        for &tool in &tools {
            self.ensure_tool(tool)?;
        }
        let product_quantity = resolve_product_amount(&product)?;

        // Nothing below can fail: the graph is mutated from here on.
        let product_name = match product.name {
            Some(n) => n,
            None => self.next_intermediate_name(),
        };

        info!(
            transformation = %name,
            %duration,
            inputs = deductions.len(),
            tools = tools.len(),
            product = %product_name,
            "add transformation"
        );

        let op_ix = self
            .graph
            .add_node(FlowNode::Transformation(TransformationNode {
                name,
                description,
                duration,
            }));

        for d in &deductions {
            if let Some(new_stock) = d.new_stock {
                if let FlowNode::Material(m) = &mut self.graph[d.material.node().raw()] {
                    debug!(material = %m.name, from = %m.quantity, to = %new_stock, "deduct stock");
                    m.quantity = new_stock;
                }
            }
            self.graph.add_edge(
                d.material.node().raw(),
                op_ix,
                FlowEdge::Consumes {
                    quantity_used: d.quantity_used,
                },
            );
        }

        for tool in &tools {
            self.graph
                .add_edge(tool.node().raw(), op_ix, FlowEdge::Requires);
        }

        let product_ix = self.graph.add_node(FlowNode::Material(MaterialNode {
            name: product_name,
            quantity: product_quantity,
        }));
        self.graph.add_edge(op_ix, product_ix, FlowEdge::Produces);

        let remaining = deductions
            .iter()
            .map(|d| d.material)
            .filter(|&m| self.material(m).is_some_and(MaterialNode::is_available))
            .collect();

        Ok(TransformationOutcome {
            transformation: TransformationId(NodeId::from(op_ix)),
            product: MaterialId(NodeId::from(product_ix)),
            remaining,
        })
    }

    /// Check every input and compute its new stock without mutating anything.
    fn plan_deductions(&self, inputs: &[(MaterialId, Quantity)]) -> FlowResult<Vec<Deduction>> {
        let mut seen = HashSet::with_capacity(inputs.len());
        let mut plan = Vec::with_capacity(inputs.len());

        for &(material, requested) in inputs {
            let node = self.material_checked(material)?;
            if !seen.insert(material) {
                return Err(FlowError::DuplicateInput {
                    material: node.name.clone(),
                });
            }

            let available = node.quantity;
            if available.category() != requested.category() {
                return Err(UnitError::CategoryMismatch {
                    expected: available.category(),
                    found: requested.category(),
                }
                .into());
            }

            let category = available.category();
            if category.is_additive() && requested.to_base() < 0.0 {
                return Err(FlowError::NegativeRequest {
                    material: node.name.clone(),
                    requested,
                });
            }

            let new_stock = if category.is_consumable() {
                let have = available.to_base();
                let want = requested.to_base();
                if have < want {
                    warn!(
                        material = %node.name,
                        %requested,
                        %available,
                        "insufficient stock"
                    );
                    return Err(FlowError::InsufficientStock {
                        material: node.name.clone(),
                        requested,
                        available,
                    });
                }
                let left = snap_to_zero(have - want, self.tolerances);
                Some(Quantity::from_base(left, available.unit())?)
            } else {
                None
            };

            plan.push(Deduction {
                material,
                quantity_used: requested,
                new_stock,
            });
        }

        Ok(plan)
    }

    fn next_intermediate_name(&mut self) -> String {
        let name = format!("Intermediate_{}", self.intermediate_counter);
        self.intermediate_counter += 1;
        name
    }
}

/// Build the product quantity, normalised through base and back.
fn resolve_product_amount(product: &ProductSpec) -> FlowResult<Quantity> {
    let quantity = match &product.amount {
        Some(a) => Quantity::new(a.magnitude, &a.unit, a.category)?,
        None => Quantity::of(1.0, CountUnit::Pieces)?,
    };
    Ok(quantity.normalized()?)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use saute_core::{MassUnit, Tolerances, VolumeUnit, nearly_equal};

    proptest! {
        #[test]
        fn deduction_conserves_base_amount(
            stock in 0.0_f64..2_000.0,
            request in 0.0_f64..5.0,
            stock_unit in 0usize..3,
            request_unit in 0usize..3,
        ) {
            let mut graph = FlowGraph::new();
            let available = Quantity::of(stock, MassUnit::ALL[stock_unit]).unwrap();
            let requested = Quantity::of(request, MassUnit::ALL[request_unit]).unwrap();
            let flour = graph.add_material_quantity("flour", available);

            let result = graph.add_transformation(
                TransformationRequest::new("mix", "", 1.0, "minutes").input(flour, requested),
            );

            match result {
                Ok(_) => {
                    let left = graph.material(flour).unwrap().quantity;
                    prop_assert_eq!(left.unit(), available.unit());
                    prop_assert!(left.to_base() >= 0.0);
                    let expected = available.to_base() - requested.to_base();
                    let tol = Tolerances { abs: 1e-6, rel: 1e-9 };
                    prop_assert!(nearly_equal(left.to_base(), expected, tol));
                }
                Err(err) => {
                    let is_insufficient = matches!(err, FlowError::InsufficientStock { .. });
                    prop_assert!(is_insufficient);
                    prop_assert!(requested.to_base() > available.to_base());
                }
            }
        }

        #[test]
        fn failed_call_changes_nothing(
            stocks in prop::collection::vec(0.0_f64..500.0, 1..5),
            requests in prop::collection::vec((0.0_f64..40.0, 0usize..6), 1..5),
        ) {
            let mut graph = FlowGraph::new();
            let bowl = graph.add_tool("bowl");
            let materials: Vec<MaterialId> = stocks
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    let q = Quantity::of(v, VolumeUnit::Milliliters).unwrap();
                    graph.add_material_quantity(format!("liquid {i}"), q)
                })
                .collect();
            let before: Vec<Quantity> = materials
                .iter()
                .map(|&m| graph.material(m).unwrap().quantity)
                .collect();
            let nodes = graph.node_count();
            let edges = graph.edge_count();

            let mut request = TransformationRequest::new("pour", "", 1.0, "minutes").tool(bowl);
            for (&m, &(v, unit)) in materials.iter().zip(&requests) {
                request = request.input(m, Quantity::of(v, VolumeUnit::ALL[unit]).unwrap());
            }

            if graph.add_transformation(request).is_err() {
                let after: Vec<Quantity> = materials
                    .iter()
                    .map(|&m| graph.material(m).unwrap().quantity)
                    .collect();
                prop_assert_eq!(after, before);
                prop_assert_eq!(graph.node_count(), nodes);
                prop_assert_eq!(graph.edge_count(), edges);
            }
        }
    }
}
