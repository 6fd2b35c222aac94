use crate::graph::{GraphNode, PortSource};
use crate::registry::{ARITHMETIC_CATEGORY, OperationSignature};
use indexmap::IndexMap;

/// One node as a category rule sees it.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub node: &'a GraphNode,
    pub signature: &'a OperationSignature,
    /// The node's display name.
    pub label: &'a str,
    wired: Option<&'a IndexMap<&'a str, PortSource<'a>>>,
}

impl<'a> NodeContext<'a> {
    pub fn new(
        node: &'a GraphNode,
        signature: &'a OperationSignature,
        label: &'a str,
        wired: Option<&'a IndexMap<&'a str, PortSource<'a>>>,
    ) -> Self {
        Self {
            node,
            signature,
            label,
            wired,
        }
    }

    /// Whether an edge feeds `port`.
    pub fn is_wired(&self, port: &str) -> bool {
        self.wired.is_some_and(|ports| ports.contains_key(port))
    }

    /// The node's literal values on ports with no incoming edge. A wired port
    /// ignores its literal, so rules never see it.
    pub fn literal_inputs(&self) -> impl Iterator<Item = (&'a str, &'a serde_json::Value)> {
        let wired = self.wired;
        self.node
            .input_values
            .iter()
            .filter(move |(port, _)| !wired.is_some_and(|ports| ports.contains_key(port.as_str())))
            .map(|(port, value)| (port.as_str(), value))
    }
}

/// A domain-specific check applied to every node whose operation belongs to one category.
pub trait ValidationRule: Send + Sync {
    /// The operation category this rule applies to.
    fn category(&self) -> &str;

    /// Returns one message per problem found on the node.
    fn check(&self, node: &NodeContext<'_>) -> Vec<String>;
}

/// The bound used by the default arithmetic rule.
pub const DEFAULT_SAFE_MAGNITUDE: f64 = 1000.0;

/// Flags literal numbers too large for tuple-length arithmetic, where `n` is encoded
/// as an `n`-element tuple.
#[derive(Debug, Clone)]
pub struct SafeMagnitudeRule {
    category: String,
    bound: f64,
}

impl SafeMagnitudeRule {
    pub fn new(category: &str, bound: f64) -> Self {
        Self {
            category: category.to_string(),
            bound,
        }
    }
}

impl Default for SafeMagnitudeRule {
    fn default() -> Self {
        Self::new(ARITHMETIC_CATEGORY, DEFAULT_SAFE_MAGNITUDE)
    }
}

impl ValidationRule for SafeMagnitudeRule {
    fn category(&self) -> &str {
        &self.category
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<String> {
        node.literal_inputs()
            .filter_map(|(port, value)| {
                let magnitude = value.as_f64()?.abs();
                if magnitude <= self.bound {
                    return None;
                }
                let port_label = node
                    .signature
                    .input(port)
                    .map(|p| p.label.as_str())
                    .unwrap_or(port);
                Some(format!(
                    "Node \"{}\": value {} on input \"{}\" exceeds the safe magnitude of {} for tuple-length arithmetic",
                    node.label, value, port_label, self.bound
                ))
            })
            .collect()
    }
}
