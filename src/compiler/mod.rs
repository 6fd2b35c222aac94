use crate::graph::{Graph, connected_components};
use crate::options::CompilerOptions;
use crate::registry::{OperationRegistry, OperationSignature};
use crate::typeexpr::ReferenceExtractor;
use crate::validator::{ValidationRule, Validator};

mod assembler;
mod emitter;
pub mod literal;
pub mod naming;
pub mod plan;
pub mod sanitize;

use naming::NameTable;
use plan::ComponentPlan;

pub use sanitize::sanitize;

/// Returned by `generate` for a graph without nodes.
pub const EMPTY_GRAPH_PLACEHOLDER: &str = "// Add nodes to the canvas to generate code";

/// Everything one compilation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationArtifacts {
    /// The names the import statement lists, macros first.
    pub imports: Vec<String>,
    /// One plan per connected component, in discovery order.
    pub components: Vec<ComponentPlan>,
    /// The alias of the combined result. Empty for an empty graph.
    pub result_alias: String,
    /// The emitted source text.
    pub source: String,
}

pub struct Compiler {
    registry: OperationRegistry,
    options: CompilerOptions,
    validator: Validator,
}

pub struct CompilerBuilder {
    registry: OperationRegistry,
    options: CompilerOptions,
    validator: Validator,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            registry: OperationRegistry::with_defaults(),
            options: CompilerOptions::default(),
            validator: Validator::new(),
        }
    }
    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }
    /// Replaces the default catalog.
    pub fn with_registry(mut self, registry: OperationRegistry) -> Self {
        self.registry = registry;
        self
    }
    pub fn with_operation(mut self, signature: OperationSignature) -> Self {
        self.registry.register(signature);
        self
    }
    pub fn with_top_level_export(mut self, name: &str) -> Self {
        self.registry.register_top_level_export(name);
        self
    }
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.validator.add_rule(rule);
        self
    }
    /// Drops the default category rules. Rules added afterwards are kept.
    pub fn without_default_rules(mut self) -> Self {
        self.validator.clear_rules();
        self
    }
    pub fn build(self) -> Compiler {
        Compiler {
            registry: self.registry,
            options: self.options,
            validator: self.validator,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Emits the source text for `graph`. Never fails; run [`validate`](Self::validate)
    /// to learn whether the text can be trusted.
    pub fn generate(&self, graph: &Graph, name_hint: &str) -> String {
        self.compile(graph, name_hint).source
    }

    pub fn validate(&self, graph: &Graph) -> Vec<String> {
        self.validator.validate(graph, &self.registry)
    }

    /// Runs the whole pipeline and keeps the intermediate plans.
    ///
    /// `name_hint` names the combined result alias; a blank hint falls back to
    /// `CompilerOptions::result_alias`.
    pub fn compile(&self, graph: &Graph, name_hint: &str) -> CompilationArtifacts {
        if graph.is_empty() {
            tracing::debug!("empty graph, emitting placeholder");
            return CompilationArtifacts {
                imports: Vec::new(),
                components: Vec::new(),
                result_alias: String::new(),
                source: EMPTY_GRAPH_PLACEHOLDER.to_string(),
            };
        }

        let components = connected_components(&graph.nodes, &graph.edges);
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            components = components.len(),
            "partitioned graph"
        );

        let extractor = ReferenceExtractor::new(&self.registry);
        let discovered = extractor.extract_all(graph.nodes.iter().map(|node| {
            self.registry
                .get(&node.operation)
                .map(|s| s.tlang_type.as_str())
                .unwrap_or(node.operation.as_str())
        }));
        let discovered_names = discovered.names();
        let imports = assembler::import_names(&self.options, &discovered_names);
        tracing::debug!(imports = ?imports, "discovered imports");

        let component_aliases: Vec<String> = (0..components.len())
            .flat_map(|i| {
                [
                    self.options.component_alias(i),
                    self.options.component_result_alias(i),
                ]
            })
            .collect();
        let mut names = NameTable::new(
            imports
                .iter()
                .copied()
                .chain(component_aliases.iter().map(String::as_str)),
        );
        let result_alias = if name_hint.trim().is_empty() {
            names.claim(&self.options.result_alias)
        } else {
            names.claim(name_hint)
        };
        names.assign_all(&graph.nodes);
        tracing::debug!(result_alias = %result_alias, "assigned binding names");

        let plans: Vec<ComponentPlan> = components
            .iter()
            .enumerate()
            .map(|(i, component)| {
                ComponentPlan::build(component, i, &names, &self.registry, &self.options)
            })
            .collect();

        let blocks: Vec<String> = plans
            .iter()
            .map(|plan| emitter::emit_component(plan, &self.options))
            .collect();
        let result_aliases: Vec<String> = plans.iter().map(|p| p.result_alias.clone()).collect();
        let source = assembler::assemble(
            &imports,
            &blocks,
            &result_alias,
            &result_aliases,
            &self.options,
        );
        tracing::debug!(bytes = source.len(), "assembled source");

        CompilationArtifacts {
            imports: imports.iter().map(|s| s.to_string()).collect(),
            components: plans,
            result_alias,
            source,
        }
    }
}
