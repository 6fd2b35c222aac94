//! Pure structural queries over a node set and an edge set.
//!
//! Every function takes anything that iterates node or edge references, so the
//! same code serves a whole [`Graph`](super::Graph) (`&graph.nodes`) and a single
//! [`Component`](super::Component) (`component.nodes.iter().copied()`).

use super::definition::{GraphEdge, GraphNode};
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

/// The output port feeding a given input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSource<'a> {
    pub node: &'a str,
    pub port: &'a str,
}

/// target node id -> target port -> source, in edge insertion order.
pub type IncomingPortMap<'a> = IndexMap<&'a str, IndexMap<&'a str, PortSource<'a>>>;

/// Nodes that no edge targets.
pub fn entry_nodes<'a>(
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
) -> Vec<&'a GraphNode> {
    let targets: AHashSet<&str> = edges.into_iter().map(|e| e.target.as_str()).collect();
    nodes
        .into_iter()
        .filter(|n| !targets.contains(n.id.as_str()))
        .collect()
}

/// Nodes that no edge leaves.
pub fn terminal_nodes<'a>(
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
) -> Vec<&'a GraphNode> {
    let sources: AHashSet<&str> = edges.into_iter().map(|e| e.source.as_str()).collect();
    nodes
        .into_iter()
        .filter(|n| !sources.contains(n.id.as_str()))
        .collect()
}

/// Indexes every edge under its (target, target port) pair.
///
/// When two edges feed the same port the later one wins.
pub fn incoming_port_map<'a>(edges: impl IntoIterator<Item = &'a GraphEdge>) -> IncomingPortMap<'a> {
    let mut map: IncomingPortMap<'a> = IndexMap::new();
    for edge in edges {
        map.entry(edge.target.as_str()).or_default().insert(
            edge.target_port(),
            PortSource {
                node: edge.source.as_str(),
                port: edge.source_port(),
            },
        );
    }
    map
}

/// Edges whose endpoints both exist in `nodes`. Every graph algorithm ignores the rest.
pub fn resolved_edges<'a>(
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
) -> Vec<&'a GraphEdge> {
    let ids: AHashSet<&str> = nodes.into_iter().map(|n| n.id.as_str()).collect();
    edges
        .into_iter()
        .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
        .collect()
}

/// Edges whose source or target id is missing from `nodes`.
pub fn dangling_edges<'a>(
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
) -> Vec<&'a GraphEdge> {
    let ids: AHashSet<&str> = nodes.into_iter().map(|n| n.id.as_str()).collect();
    edges
        .into_iter()
        .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
        .collect()
}

/// Dense indexing of a node list: position by id and successor lists over resolved edges.
pub(crate) struct Adjacency<'a> {
    pub nodes: Vec<&'a GraphNode>,
    pub successors: Vec<Vec<usize>>,
    pub in_degree: Vec<usize>,
}

impl<'a> Adjacency<'a> {
    pub fn build(
        nodes: impl IntoIterator<Item = &'a GraphNode>,
        edges: impl IntoIterator<Item = &'a GraphEdge>,
    ) -> Self {
        let nodes: Vec<&GraphNode> = nodes.into_iter().collect();
        let mut index: AHashMap<&str, usize> = AHashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let mut successors = vec![Vec::new(); nodes.len()];
        let mut in_degree = vec![0usize; nodes.len()];
        for edge in edges {
            if let (Some(&source), Some(&target)) =
                (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            {
                successors[source].push(target);
                in_degree[target] += 1;
            }
        }

        Self {
            nodes,
            successors,
            in_degree,
        }
    }
}
