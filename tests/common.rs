//! Common test utilities for building graphs.
use typeflow::prelude::*;

/// A node with no label and no literal values.
#[allow(dead_code)]
pub fn node(id: &str, operation: &str) -> GraphNode {
    GraphNode::new(id, operation)
}

/// An edge between the default ports (`out` -> `in`).
#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
    GraphEdge::new(id, source, target)
}

/// An edge between named ports.
#[allow(dead_code)]
pub fn port_edge(id: &str, source: &str, source_port: &str, target: &str, target_port: &str) -> GraphEdge {
    GraphEdge::new(id, source, target).with_ports(source_port, target_port)
}

/// `n1: Strings.Lowercase -> n2: Strings.CamelCase`
#[allow(dead_code)]
pub fn create_linear_chain() -> Graph {
    Graph::new(
        vec![
            node("n1", "Strings.Lowercase"),
            node("n2", "Strings.CamelCase"),
        ],
        vec![edge("e1", "n1", "n2")],
    )
}

/// Two isolated nodes from different namespaces.
#[allow(dead_code)]
pub fn create_disconnected_graph() -> Graph {
    Graph::new(
        vec![
            node("n1", "Strings.Uppercase"),
            node("n2", "Numbers.Increment"),
        ],
        vec![],
    )
}

/// `n2: Numbers.Add` is fed on `b` only, so its required `a` is unwired.
#[allow(dead_code)]
pub fn create_missing_input_graph() -> Graph {
    Graph::new(
        vec![node("n1", "Numbers.Increment"), node("n2", "Numbers.Add")],
        vec![port_edge("e1", "n1", "out", "n2", "b")],
    )
}

/// `A -> B -> A`
#[allow(dead_code)]
pub fn create_cyclic_graph() -> Graph {
    Graph::new(
        vec![node("A", "Strings.Uppercase"), node("B", "Strings.Lowercase")],
        vec![edge("e1", "A", "B"), edge("e2", "B", "A")],
    )
}

/// `A -> B -> C -> A`, optionally without the closing edge.
#[allow(dead_code)]
pub fn create_triangle(closed: bool) -> Graph {
    let mut edges = vec![edge("e1", "A", "B"), edge("e2", "B", "C")];
    if closed {
        edges.push(edge("e3", "C", "A"));
    }
    Graph::new(
        vec![
            node("A", "Strings.Trim"),
            node("B", "Strings.Trim"),
            node("C", "Strings.Trim"),
        ],
        edges,
    )
}

/// A saved canvas in the editor's format: a snake_case string fed through camel-casing.
#[allow(dead_code)]
pub const EDITOR_DOCUMENT_JSON: &str = r#"{
  "nodes": [
    {
      "id": "node_0",
      "position": { "x": 120, "y": 80 },
      "data": {
        "label": "Source",
        "nodeType": { "id": "Strings.Lowercase", "name": "Lowercase" },
        "inputValues": { "in": "Hello_World" }
      }
    },
    {
      "id": "node_1",
      "position": { "x": 420, "y": 80 },
      "data": {
        "label": "Camel",
        "nodeType": { "id": "Strings.CamelCase" }
      }
    }
  ],
  "edges": [
    {
      "id": "xy-edge__node_0out-node_1in",
      "source": "node_0",
      "sourceHandle": "out",
      "target": "node_1",
      "targetHandle": "in"
    }
  ]
}"#;
