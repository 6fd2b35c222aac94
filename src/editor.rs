//! The canvas editor's document format.
//!
//! The editor stores each node's operation under `data.nodeType.id` and its
//! literal inputs under `data.inputValues`, next to layout state the compiler
//! ignores.

use crate::error::{GraphConversionError, GraphError};
use crate::graph::{Graph, GraphEdge, GraphNode, IntoGraph};
use ahash::AHashSet;
use indexmap::IndexMap;
use serde::Deserialize;

/// The operation a palette item places on the canvas.
#[derive(Debug, Deserialize, Clone)]
pub struct EditorNodeType {
    pub id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorNodeData {
    #[serde(alias = "nodeType")]
    pub node_type: EditorNodeType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, alias = "inputValues")]
    pub input_values: Option<IndexMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorNode {
    pub id: String,
    pub data: EditorNodeData,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
    pub target: String,
    #[serde(default, alias = "targetHandle")]
    pub target_handle: Option<String>,
}

/// A saved canvas: nodes and edges as the editor writes them.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EditorDocument {
    #[serde(default)]
    pub nodes: Vec<EditorNode>,
    #[serde(default)]
    pub edges: Vec<EditorEdge>,
}

impl EditorDocument {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))
    }
}

impl IntoGraph for EditorDocument {
    fn into_graph(self) -> Result<Graph, GraphConversionError> {
        let mut seen: AHashSet<String> = AHashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());

        for node in self.nodes {
            if node.id.trim().is_empty() {
                return Err(GraphConversionError::ValidationError(
                    "node with an empty id".to_string(),
                ));
            }
            if node.data.node_type.id.trim().is_empty() {
                return Err(GraphConversionError::ValidationError(format!(
                    "node '{}' has no operation",
                    node.id
                )));
            }
            if !seen.insert(node.id.clone()) {
                return Err(GraphConversionError::ValidationError(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }

            nodes.push(GraphNode {
                id: node.id,
                operation: node.data.node_type.id,
                label: node.data.label,
                input_values: node.data.input_values.unwrap_or_default(),
            });
        }

        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, edge)| GraphEdge {
                id: if edge.id.is_empty() {
                    format!("edge_{}", i)
                } else {
                    edge.id
                },
                source: edge.source,
                source_handle: edge.source_handle.filter(|h| !h.is_empty()),
                target: edge.target,
                target_handle: edge.target_handle.filter(|h| !h.is_empty()),
            })
            .collect();

        Ok(Graph::new(nodes, edges))
    }
}

/// Parses either the canonical graph JSON or an editor document.
///
/// A document whose nodes carry a `data` object is read as an editor document.
pub fn graph_from_json(json: &str) -> Result<Graph, GraphError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))?;
    let is_editor_document = value
        .get("nodes")
        .and_then(|n| n.as_array())
        .is_some_and(|nodes| nodes.iter().any(|n| n.get("data").is_some()));

    if is_editor_document {
        let document: EditorDocument = serde_json::from_value(value)
            .map_err(|e| GraphError::JsonParseError(e.to_string()))?;
        Ok(document.into_graph()?)
    } else {
        serde_json::from_value(value).map_err(|e| GraphError::JsonParseError(e.to_string()))
    }
}
