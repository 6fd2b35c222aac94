use super::definition::{GraphEdge, GraphNode};
use super::query::Adjacency;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

/// Reports whether the directed graph contains a cycle.
///
/// Depth-first search with an explicit stack, restarted from every node that is
/// still unvisited so disconnected subgraphs are covered. Reaching a node that
/// is on the stack is a back-edge; reaching a finished node is a cross-edge.
pub fn has_cycle<'a>(
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
) -> bool {
    let adjacency = Adjacency::build(nodes, edges);
    let successors = &adjacency.successors;
    let mut state = vec![VisitState::Unvisited; adjacency.nodes.len()];

    for root in 0..state.len() {
        if state[root] != VisitState::Unvisited {
            continue;
        }

        // (node, index of the next successor to follow)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        state[root] = VisitState::OnStack;

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            match successors[node].get(frame.1) {
                Some(&succ) => {
                    frame.1 += 1;
                    match state[succ] {
                        VisitState::OnStack => return true,
                        VisitState::Done => {}
                        VisitState::Unvisited => {
                            state[succ] = VisitState::OnStack;
                            stack.push((succ, 0));
                        }
                    }
                }
                None => {
                    state[node] = VisitState::Done;
                    stack.pop();
                }
            }
        }
    }
    false
}
