//! # typeflow - Type-Level Graph Compiler
//!
//! **typeflow** turns node-based graphs of type-level transformations into source
//! text a standard type checker can import. Every node instantiates an operation
//! from the `tlang` combinator library; every edge wires one node's output port
//! into another node's input port.
//!
//! ## Core Workflow
//!
//! The compiler is a pure function of a graph snapshot:
//!
//! 1.  **Load a Graph**: Parse the canonical JSON with `Graph::from_json`, read an
//!     editor document with `EditorDocument`, or implement `IntoGraph` for your own format.
//! 2.  **Validate**: `Compiler::validate` lists structural problems (cycles, unwired
//!     required inputs, out-of-range literals). Validation never blocks generation.
//! 3.  **Generate**: `Compiler::generate` partitions the graph into connected
//!     components and emits, per component, a declarative `DAG<...>` type plus an
//!     explicit `Exec<...>` listing in topological order, followed by a combined result.
//!
//! ## Quick Start
//!
//! ```rust
//! use typeflow::prelude::*;
//!
//! let graph = Graph::new(
//!     vec![
//!         GraphNode::new("n1", "Strings.Lowercase"),
//!         GraphNode::new("n2", "Strings.CamelCase"),
//!     ],
//!     vec![GraphEdge::new("e1", "n1", "n2")],
//! );
//!
//! let compiler = Compiler::builder().build();
//! assert!(compiler.validate(&graph).is_empty());
//!
//! let source = compiler.generate(&graph, "");
//! assert!(source.starts_with("import type { DAG, Exec, Out, Strings } from 'tlang';"));
//! assert!(source.contains("type n2 = Exec<Strings.CamelCase, { in: Out<n1, 'out'> }>;"));
//! assert!(source.ends_with("type Result = TypeFlow_1_Result;\n"));
//! ```

pub mod compiler;
pub mod editor;
pub mod error;
pub mod graph;
pub mod options;
pub mod prelude;
pub mod registry;
pub mod typeexpr;
pub mod validator;

#[cfg(feature = "python-bindings")]
mod python;

use compiler::Compiler;
use graph::Graph;

/// Generates source text for `graph` with the default catalog and options.
pub fn generate(graph: &Graph, name_hint: &str) -> String {
    Compiler::default().generate(graph, name_hint)
}

/// Validates `graph` with the default catalog and rules.
pub fn validate(graph: &Graph) -> Vec<String> {
    Compiler::default().validate(graph)
}
