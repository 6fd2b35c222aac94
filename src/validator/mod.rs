//! Structural checks reported as human-readable messages.
//!
//! Validation never blocks code generation. The caller decides whether a
//! non-empty report makes the generated text untrustworthy.

mod rules;

pub use rules::{DEFAULT_SAFE_MAGNITUDE, NodeContext, SafeMagnitudeRule, ValidationRule};

use crate::graph::{
    Graph, GraphNode, dangling_edges, entry_nodes, has_cycle, incoming_port_map, resolved_edges,
};
use crate::registry::{OperationRegistry, OperationSignature};
use ahash::AHashSet;
use indexmap::IndexMap;

pub const CYCLE_MESSAGE: &str = "Graph contains a cycle. Type-level DAGs must be acyclic.";

/// Runs the structural checks plus every registered category rule.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.category()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Validator {
    /// A validator with the default rules (`SafeMagnitudeRule` for arithmetic).
    pub fn new() -> Self {
        Self::empty().with_rule(Box::new(SafeMagnitudeRule::default()))
    }

    /// A validator with the structural checks only.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Returns every problem found, in a stable order: the cycle message first,
    /// then per-node problems in node order, then duplicate and dangling connections.
    pub fn validate(&self, graph: &Graph, registry: &OperationRegistry) -> Vec<String> {
        let mut problems = Vec::new();
        let edges = resolved_edges(&graph.nodes, &graph.edges);

        if has_cycle(&graph.nodes, edges.iter().copied()) {
            problems.push(CYCLE_MESSAGE.to_string());
        }

        let entries: AHashSet<&str> = entry_nodes(&graph.nodes, edges.iter().copied())
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        let incoming = incoming_port_map(edges.iter().copied());

        for node in &graph.nodes {
            let Some(signature) = registry.get(&node.operation) else {
                problems.push(format!(
                    "Node \"{}\" uses unknown operation \"{}\"",
                    display_label(node, None),
                    node.operation
                ));
                continue;
            };
            let label = display_label(node, Some(signature));
            let wired = incoming.get(node.id.as_str());

            if !entries.contains(node.id.as_str()) {
                for port in signature.required_inputs() {
                    if !wired.is_some_and(|m| m.contains_key(port.id.as_str())) {
                        problems.push(format!(
                            "Node \"{}\" is missing required input \"{}\"",
                            label, port.label
                        ));
                    }
                }
            }

            let context = NodeContext::new(node, signature, &label, wired);
            for rule in self
                .rules
                .iter()
                .filter(|r| r.category() == signature.category)
            {
                problems.extend(rule.check(&context));
            }
        }

        let mut fan_in: IndexMap<(&str, &str), usize> = IndexMap::new();
        for edge in &edges {
            *fan_in
                .entry((edge.target.as_str(), edge.target_port()))
                .or_default() += 1;
        }
        for ((target, port), count) in fan_in {
            if count < 2 {
                continue;
            }
            let label = graph
                .node(target)
                .map(|n| display_label(n, registry.get(&n.operation)))
                .unwrap_or_else(|| target.to_string());
            problems.push(format!(
                "Input \"{}\" on node \"{}\" has {} incoming connections; only the last one is used",
                port, label, count
            ));
        }

        let ids: AHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in dangling_edges(&graph.nodes, &graph.edges) {
            for missing in [edge.source.as_str(), edge.target.as_str()] {
                if !ids.contains(missing) {
                    problems.push(format!(
                        "Connection \"{}\" references missing node \"{}\"",
                        edge.id, missing
                    ));
                }
            }
        }

        tracing::debug!(problems = problems.len(), "validated graph");
        problems
    }
}

/// The node's label, else the operation's display name, else the node id.
pub(crate) fn display_label(node: &GraphNode, signature: Option<&OperationSignature>) -> String {
    node.label
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .or_else(|| signature.map(|s| s.name.as_str()))
        .unwrap_or(&node.id)
        .to_string()
}
