//! The per-component emission plan.
//!
//! Both the declarative DAG literal and the execute listing are rendered from one
//! `ComponentPlan`, so the two representations cannot drift apart.

use super::literal::default_value;
use super::naming::NameTable;
use crate::graph::{
    Component, GraphNode, PortSource, entry_nodes, incoming_port_map, terminal_nodes,
    topological_sort,
};
use crate::options::CompilerOptions;
use crate::registry::{OperationRegistry, OperationSignature, PortDef};
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;

/// Where a node reads one input port from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputBinding {
    /// A literal for an entry node's required port.
    Literal(Value),
    /// A named output of an earlier node.
    Output(OutputRef),
}

/// A reference to one output port of a node binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRef {
    pub binding: String,
    pub port: String,
}

/// Everything emitted for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePlan {
    pub node_id: String,
    pub binding: String,
    /// The operation's type text, emitted verbatim.
    pub type_text: String,
    pub is_entry: bool,
    /// Bound input ports in declared-port order. Unbound ports are absent.
    pub inputs: Vec<(String, InputBinding)>,
    /// The port a result reference reads from this node.
    pub primary_output: String,
}

impl NodePlan {
    /// The literal bindings, which double as the node's initial values in the DAG literal.
    pub fn literal_inputs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inputs.iter().filter_map(|(port, binding)| match binding {
            InputBinding::Literal(value) => Some((port.as_str(), value)),
            InputBinding::Output(_) => None,
        })
    }
}

/// One typed connection in the DAG literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPlan {
    pub from: OutputRef,
    pub to: OutputRef,
}

/// Everything emitted for one connected component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPlan {
    pub index: usize,
    /// Alias of the DAG declaration, e.g. `TypeFlow_1`.
    pub alias: String,
    /// Alias of the component's result, e.g. `TypeFlow_1_Result`.
    pub result_alias: String,
    /// Nodes in node-array order.
    pub nodes: Vec<NodePlan>,
    /// Indices into `nodes`, in topological order.
    pub order: Vec<usize>,
    pub connections: Vec<ConnectionPlan>,
    pub result: OutputRef,
}

impl ComponentPlan {
    pub fn build(
        component: &Component<'_>,
        index: usize,
        names: &NameTable,
        registry: &OperationRegistry,
        options: &CompilerOptions,
    ) -> Self {
        let node_refs = || component.nodes.iter().copied();
        let edge_refs = || component.edges.iter().copied();

        let entries: AHashSet<&str> = entry_nodes(node_refs(), edge_refs())
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        let incoming = incoming_port_map(edge_refs());

        let nodes: Vec<NodePlan> = component
            .nodes
            .iter()
            .map(|node| {
                let wired = incoming.get(node.id.as_str());
                let signature = resolve_signature(registry, node, wired);
                let is_entry = entries.contains(node.id.as_str());
                NodePlan {
                    node_id: node.id.clone(),
                    binding: names.binding(&node.id),
                    type_text: signature.tlang_type.clone(),
                    is_entry,
                    inputs: bind_inputs(node, &signature, wired, is_entry, names),
                    primary_output: signature.primary_output().to_string(),
                }
            })
            .collect();

        let mut position: AHashMap<&str, usize> = AHashMap::new();
        for (i, node) in component.nodes.iter().enumerate() {
            position.entry(node.id.as_str()).or_insert(i);
        }
        let order: Vec<usize> = topological_sort(node_refs(), edge_refs())
            .into_iter()
            .filter_map(|n| position.get(n.id.as_str()).copied())
            .collect();

        let connections = component
            .edges
            .iter()
            .map(|edge| ConnectionPlan {
                from: OutputRef {
                    binding: names.binding(&edge.source),
                    port: edge.source_port().to_string(),
                },
                to: OutputRef {
                    binding: names.binding(&edge.target),
                    port: edge.target_port().to_string(),
                },
            })
            .collect();

        let result_index = terminal_nodes(node_refs(), edge_refs())
            .first()
            .and_then(|n| position.get(n.id.as_str()).copied())
            .or_else(|| order.last().copied())
            .unwrap_or(nodes.len().saturating_sub(1));
        let result = nodes
            .get(result_index)
            .map(|n| OutputRef {
                binding: n.binding.clone(),
                port: n.primary_output.clone(),
            })
            .unwrap_or_else(|| OutputRef {
                binding: String::new(),
                port: crate::graph::DEFAULT_SOURCE_PORT.to_string(),
            });

        tracing::trace!(
            component = index + 1,
            nodes = nodes.len(),
            connections = component.edges.len(),
            result = %result.binding,
            "planned component"
        );

        Self {
            index,
            alias: options.component_alias(index),
            result_alias: options.component_result_alias(index),
            nodes,
            order,
            connections,
            result,
        }
    }

    /// Nodes in the order their execute statements are emitted.
    pub fn steps(&self) -> impl Iterator<Item = &NodePlan> {
        self.order.iter().filter_map(|&i| self.nodes.get(i))
    }
}

/// The registered signature, or an opaque stand-in for an unknown operation.
pub(crate) fn resolve_signature<'r>(
    registry: &'r OperationRegistry,
    node: &GraphNode,
    wired: Option<&IndexMap<&str, PortSource<'_>>>,
) -> Cow<'r, OperationSignature> {
    match registry.get(&node.operation) {
        Some(signature) => Cow::Borrowed(signature),
        None => {
            let wired_ports = wired.into_iter().flat_map(|m| m.keys().copied());
            let valued_ports = node.input_values.keys().map(String::as_str);
            Cow::Owned(OperationSignature::opaque(
                &node.operation,
                wired_ports,
                valued_ports,
            ))
        }
    }
}

/// The literal an entry node uses for `port`: the user's value, else the type default.
/// Only required ports get one.
pub(crate) fn entry_literal(node: &GraphNode, port: &PortDef) -> Option<Value> {
    if !port.required {
        return None;
    }
    Some(
        node.input_value(&port.id)
            .cloned()
            .unwrap_or_else(|| default_value(port.port_type)),
    )
}

fn bind_inputs(
    node: &GraphNode,
    signature: &OperationSignature,
    wired: Option<&IndexMap<&str, PortSource<'_>>>,
    is_entry: bool,
    names: &NameTable,
) -> Vec<(String, InputBinding)> {
    let mut inputs = Vec::new();
    for port in &signature.inputs {
        let binding = match wired.and_then(|m| m.get(port.id.as_str())) {
            Some(source) => Some(InputBinding::Output(OutputRef {
                binding: names.binding(source.node),
                port: source.port.to_string(),
            })),
            None if is_entry => entry_literal(node, port).map(InputBinding::Literal),
            None => None,
        };
        if let Some(binding) = binding {
            inputs.push((port.id.clone(), binding));
        }
    }
    inputs
}
