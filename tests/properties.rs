//! Property tests over randomly generated graphs.
use proptest::prelude::*;
use typeflow::compiler::sanitize::{FALLBACK_IDENTIFIER, is_identifier, sanitize};
use typeflow::graph::{connected_components, has_cycle, topological_sort};
use typeflow::prelude::*;

const OPERATIONS: &[&str] = &[
    "Strings.Uppercase",
    "Strings.Trim",
    "Numbers.Increment",
    "Tuples.Reverse",
    "Pick.UserName",
    "Objects.MapKeys.CamelCase",
    "Vendor.Unknown",
];

fn build_graph(ops: &[usize], pairs: &[(usize, usize)], acyclic: bool) -> Graph {
    let nodes = ops
        .iter()
        .enumerate()
        .map(|(i, &op)| GraphNode::new(format!("n{}", i), OPERATIONS[op]))
        .collect();
    let edges = pairs
        .iter()
        .filter(|(a, b)| !acyclic || a != b)
        .enumerate()
        .map(|(i, &(a, b))| {
            let (source, target) = if acyclic && a > b { (b, a) } else { (a, b) };
            GraphEdge::new(format!("e{}", i), format!("n{}", source), format!("n{}", target))
        })
        .collect();
    Graph::new(nodes, edges)
}

proptest::prop_compose! {
    /// Graphs whose edges only run from lower to higher node index.
    fn arb_dag()(n in 1usize..9)(
        ops in prop::collection::vec(0..OPERATIONS.len(), n),
        pairs in prop::collection::vec((0..n, 0..n), 0..14),
    ) -> Graph {
        build_graph(&ops, &pairs, true)
    }
}

proptest::prop_compose! {
    /// Graphs with arbitrary edges, self-loops and back-edges included.
    fn arb_graph()(n in 1usize..9)(
        ops in prop::collection::vec(0..OPERATIONS.len(), n),
        pairs in prop::collection::vec((0..n, 0..n), 0..14),
    ) -> Graph {
        build_graph(&ops, &pairs, false)
    }
}

proptest::proptest! {
    #[test]
    fn sanitize_is_idempotent_and_total(raw in "\\PC*") {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once.clone());
        prop_assert!(is_identifier(&once) || once == FALLBACK_IDENTIFIER);
        prop_assert!(!once.ends_with('_'));
        prop_assert!(once.chars().any(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generate_is_deterministic(graph in arb_graph()) {
        let compiler = Compiler::default();
        prop_assert_eq!(compiler.generate(&graph, "Flow"), compiler.generate(&graph, "Flow"));
    }

    #[test]
    fn components_partition_nodes_and_edges(graph in arb_graph()) {
        let components = connected_components(&graph.nodes, &graph.edges);

        let mut node_ids: Vec<&str> = components
            .iter()
            .flat_map(|c| c.nodes.iter().map(|n| n.id.as_str()))
            .collect();
        node_ids.sort_unstable();
        let mut expected: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(node_ids, expected);

        let mut edge_ids: Vec<&str> = components
            .iter()
            .flat_map(|c| c.edges.iter().map(|e| e.id.as_str()))
            .collect();
        edge_ids.sort_unstable();
        let mut expected: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(edge_ids, expected);
    }

    #[test]
    fn topological_order_respects_every_edge(graph in arb_dag()) {
        let order = topological_sort(&graph.nodes, &graph.edges);
        prop_assert_eq!(order.len(), graph.nodes.len());

        let position = |id: &str| order.iter().position(|n| n.id == id);
        for edge in &graph.edges {
            prop_assert!(position(&edge.source) < position(&edge.target));
        }

        let source = Compiler::default().generate(&graph, "");
        for edge in &graph.edges {
            let producer = source.find(&format!("type {} = Exec<", edge.source));
            let consumer = source.find(&format!("type {} = Exec<", edge.target));
            prop_assert!(producer.is_some() && producer < consumer);
        }
    }

    #[test]
    fn cycle_detection_agrees_with_sorter(graph in arb_graph()) {
        let cyclic = has_cycle(&graph.nodes, &graph.edges);
        let sorted = topological_sort(&graph.nodes, &graph.edges).len();
        prop_assert_eq!(cyclic, sorted < graph.nodes.len());
    }

    #[test]
    fn validator_flags_cycles_first(graph in arb_graph()) {
        let problems = Compiler::default().validate(&graph);
        let cyclic = has_cycle(&graph.nodes, &graph.edges);
        prop_assert_eq!(
            problems.first().map(String::as_str) == Some(typeflow::validator::CYCLE_MESSAGE),
            cyclic
        );
    }
}
