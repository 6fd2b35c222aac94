//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load a graph, compile it and read the results.
//!
//! # Example
//!
//! ```rust,no_run
//! use typeflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = Graph::from_file("path/to/graph.json")?;
//!
//! let compiler = Compiler::builder().build();
//! for problem in compiler.validate(&graph) {
//!     eprintln!("warning: {}", problem);
//! }
//! println!("{}", compiler.generate(&graph, "MyFlow"));
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{CompilationArtifacts, Compiler, CompilerBuilder};
pub use crate::options::CompilerOptions;
pub use crate::validator::{NodeContext, SafeMagnitudeRule, ValidationRule, Validator};

// Graph model
pub use crate::editor::EditorDocument;
pub use crate::graph::{Graph, GraphEdge, GraphNode, IntoGraph};

// Operation catalog
pub use crate::registry::{OperationRegistry, OperationSignature, PortDef, PortType};

// Error types
pub use crate::error::{ConfigError, GraphConversionError, GraphError, TypeExprError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
