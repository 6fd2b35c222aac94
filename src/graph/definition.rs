use crate::error::GraphError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// Port name assumed for an edge endpoint that does not name its source port.
pub const DEFAULT_SOURCE_PORT: &str = "out";
/// Port name assumed for an edge endpoint that does not name its target port.
pub const DEFAULT_TARGET_PORT: &str = "in";

/// A read-only snapshot of a user graph, ready for validation and code generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

/// One placed instance of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    /// Identity of the operation signature in the registry, e.g. `"Strings.Uppercase"`.
    #[serde(alias = "type", alias = "nodeType")]
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Literal values keyed by input port, used only where the port has no incoming edge.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub input_values: IndexMap<String, serde_json::Value>,
}

/// A directed connection from one node's output port to another node's input port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    #[serde(default, alias = "sourcePort", skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    pub target: String,
    #[serde(default, alias = "targetPort", skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Parses a graph from its canonical JSON form.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))
    }

    /// Loads a graph from a canonical JSON file.
    pub fn from_file(path: &str) -> Result<Self, GraphError> {
        let content = fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl GraphNode {
    pub fn new(id: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            operation: operation.into(),
            label: None,
            input_values: IndexMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_input_value(mut self, port: impl Into<String>, value: serde_json::Value) -> Self {
        self.input_values.insert(port.into(), value);
        self
    }

    /// The user-supplied literal for `port`, if any.
    pub fn input_value(&self, port: &str) -> Option<&serde_json::Value> {
        self.input_values.get(port)
    }
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            source_handle: None,
            target: target.into(),
            target_handle: None,
        }
    }

    pub fn with_ports(mut self, source_port: impl Into<String>, target_port: impl Into<String>) -> Self {
        self.source_handle = Some(source_port.into());
        self.target_handle = Some(target_port.into());
        self
    }

    /// The source port, defaulting to `"out"`.
    pub fn source_port(&self) -> &str {
        self.source_handle.as_deref().unwrap_or(DEFAULT_SOURCE_PORT)
    }

    /// The target port, defaulting to `"in"`.
    pub fn target_port(&self) -> &str {
        self.target_handle.as_deref().unwrap_or(DEFAULT_TARGET_PORT)
    }
}
