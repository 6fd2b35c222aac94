use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::fs;
use typeflow::graph::{Graph, GraphEdge, GraphNode};
use typeflow::registry::{OperationRegistry, OperationSignature, PortType};

/// A CLI tool to generate random typeflow graphs for stress tests and fixtures
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Total number of nodes
    #[arg(short, long, default_value_t = 12)]
    nodes: usize,

    /// Number of connected components the nodes are spread over
    #[arg(short, long, default_value_t = 1)]
    components: usize,

    /// Probability of an extra edge between two nodes of the same component
    #[arg(short, long, default_value_t = 0.2)]
    density: f64,

    /// Close a cycle in the first component
    #[arg(long)]
    cycle: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.components == 0 || cli.components > cli.nodes.max(1) {
        eprintln!(
            "Error: --components ({}) must be between 1 and --nodes ({})",
            cli.components, cli.nodes
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.density) {
        eprintln!("Error: --density ({}) must be within 0.0..=1.0", cli.density);
        std::process::exit(1);
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    println!(
        "Generating graph with {} node(s) in {} component(s) (seed {})...",
        cli.nodes, cli.components, seed
    );

    let registry = OperationRegistry::with_defaults();
    let palette: Vec<&OperationSignature> = registry
        .operations()
        .filter(|s| !s.inputs.is_empty())
        .collect();

    let graph = generate_graph(&mut rng, &palette, &cli);
    println!(
        "-> Generated {} node(s) and {} edge(s).",
        graph.nodes.len(),
        graph.edges.len()
    );

    let json_output = serde_json::to_string_pretty(&graph)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved graph to '{}'", cli.output);

    Ok(())
}

/// Tracks which input ports of a node are already wired.
struct Slot<'r> {
    id: String,
    signature: &'r OperationSignature,
    wired: Vec<bool>,
}

impl Slot<'_> {
    fn take_free_port(&mut self) -> Option<String> {
        let free = self.wired.iter().position(|w| !w)?;
        self.wired[free] = true;
        Some(self.signature.inputs[free].id.clone())
    }
}

fn generate_graph(rng: &mut StdRng, palette: &[&OperationSignature], cli: &Cli) -> Graph {
    let mut slots: Vec<Slot> = Vec::with_capacity(cli.nodes);
    for i in 0..cli.nodes {
        let Some(&signature) = palette.choose(rng) else {
            break;
        };
        slots.push(Slot {
            id: format!("node_{}", i),
            signature,
            wired: vec![false; signature.inputs.len()],
        });
    }

    // Round-robin assignment keeps every component non-empty.
    let groups: Vec<Vec<usize>> = (0..cli.components)
        .map(|c| (c..slots.len()).step_by(cli.components).collect())
        .collect();

    let mut edges = Vec::new();
    for group in &groups {
        // A spanning tree first so the component stays connected.
        for (position, &target) in group.iter().enumerate().skip(1) {
            let source = group[rng.random_range(0..position)];
            connect(&mut slots, &mut edges, source, target);
        }
        for (a, &source) in group.iter().enumerate() {
            for &target in &group[a + 1..] {
                if rng.random_bool(cli.density) {
                    connect(&mut slots, &mut edges, source, target);
                }
            }
        }
    }

    if cli.cycle {
        if let Some(group) = groups.first().filter(|g| g.len() >= 2) {
            let (first, last) = (group[0], group[group.len() - 1]);
            connect(&mut slots, &mut edges, last, first);
            println!("-> Closed a cycle from '{}' to '{}'.", slots[last].id, slots[first].id);
        }
    }

    let nodes = slots
        .iter()
        .map(|slot| {
            let mut node = GraphNode::new(slot.id.clone(), slot.signature.id.clone());
            for (port, wired) in slot.signature.inputs.iter().zip(&slot.wired) {
                if !wired && port.required && rng.random_bool(0.5) {
                    node = node.with_input_value(port.id.clone(), random_literal(rng, port.port_type));
                }
            }
            node
        })
        .collect();

    Graph::new(nodes, edges)
}

fn connect(slots: &mut [Slot], edges: &mut Vec<GraphEdge>, source: usize, target: usize) {
    let Some(port) = slots[target].take_free_port() else {
        return;
    };
    let edge = GraphEdge::new(
        format!("edge_{}", edges.len()),
        slots[source].id.clone(),
        slots[target].id.clone(),
    )
    .with_ports("out", port);
    edges.push(edge);
}

fn random_literal(rng: &mut StdRng, port_type: PortType) -> Value {
    const WORDS: &[&str] = &["hello_world", "user-name", "Type Flow", "snake_case_value"];
    match port_type {
        PortType::String => json!(WORDS.choose(rng).copied().unwrap_or("hello")),
        PortType::Number => json!(rng.random_range(0..100)),
        PortType::Boolean => json!(rng.random_bool(0.5)),
        PortType::Array => json!([1, 2, 3]),
        PortType::Object => json!({ "id": rng.random_range(1..10), "name": "example" }),
        PortType::Function | PortType::Any => Value::Null,
    }
}
