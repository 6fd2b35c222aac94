use super::definition::{GraphEdge, GraphNode};
use super::query::Adjacency;
use std::collections::VecDeque;

/// Linearizes the graph with Kahn's algorithm.
///
/// Nodes that become eligible at the same time are emitted in node-array order.
/// The caller must have ruled out cycles with [`has_cycle`](super::has_cycle): nodes
/// inside a cycle never reach in-degree zero and are silently left out.
pub fn topological_sort<'a>(
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
) -> Vec<&'a GraphNode> {
    let Adjacency {
        nodes,
        successors,
        mut in_degree,
    } = Adjacency::build(nodes, edges);

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(current) = queue.pop_front() {
        order.push(nodes[current]);
        for &succ in &successors[current] {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != nodes.len() {
        tracing::debug!(
            dropped = nodes.len() - order.len(),
            "topological sort ran on a cyclic graph"
        );
    }
    order
}
