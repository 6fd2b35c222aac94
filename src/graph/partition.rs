use super::definition::{GraphEdge, GraphNode};
use super::query::resolved_edges;
use ahash::{AHashMap, AHashSet};

/// A maximal set of nodes connected when edge direction is ignored, with the edges among them.
#[derive(Debug, Clone)]
pub struct Component<'a> {
    /// Members in node-array order.
    pub nodes: Vec<&'a GraphNode>,
    /// Edges with both endpoints in `nodes`, in edge-array order.
    pub edges: Vec<&'a GraphEdge>,
}

impl<'a> Component<'a> {
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Splits the graph into independent components.
///
/// Components come out in the order their first member appears in `nodes`;
/// isolated nodes become singleton components with no edges.
pub fn connected_components<'a>(
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
) -> Vec<Component<'a>> {
    let edges = resolved_edges(nodes, edges);

    let mut neighbors: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in &edges {
        neighbors
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        neighbors
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
    }

    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut components = Vec::new();

    for start in nodes {
        if !visited.insert(start.id.as_str()) {
            continue;
        }

        let mut members: AHashSet<&str> = AHashSet::new();
        let mut stack = vec![start.id.as_str()];
        while let Some(current) = stack.pop() {
            members.insert(current);
            for &next in neighbors.get(current).into_iter().flatten() {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }

        components.push(Component {
            nodes: nodes
                .iter()
                .filter(|n| members.contains(n.id.as_str()))
                .collect(),
            edges: edges
                .iter()
                .copied()
                .filter(|e| members.contains(e.source.as_str()))
                .collect(),
        });
    }

    components
}
