use crate::error::ConfigError;
use ahash::AHashSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

mod catalog;

pub use catalog::{ARITHMETIC_CATEGORY, TOP_LEVEL_EXPORTS};

/// Semantic type tag of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Number,
    String,
    Object,
    Array,
    Boolean,
    Function,
    Any,
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PortType::Number => "number",
            PortType::String => "string",
            PortType::Object => "object",
            PortType::Array => "array",
            PortType::Boolean => "boolean",
            PortType::Function => "function",
            PortType::Any => "any",
        };
        f.write_str(name)
    }
}

/// A named, typed input or output slot on an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDef {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub port_type: PortType,
    #[serde(default)]
    pub required: bool,
}

impl PortDef {
    pub fn new(id: &str, label: &str, port_type: PortType, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            port_type,
            required,
        }
    }
}

/// The shared, reusable definition of an operation's ports and its type text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSignature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<PortDef>,
    #[serde(default)]
    pub outputs: Vec<PortDef>,
    /// Type-expression text emitted verbatim, e.g. `Objects.MapKeys<Strings.CamelCase>`.
    pub tlang_type: String,
}

impl OperationSignature {
    /// A stand-in signature for an operation id the registry does not know.
    ///
    /// The id doubles as the type text. Inputs are the ports the node is wired on
    /// plus the ports it carries literal values for; only the latter are required,
    /// so an entry node keeps its literals.
    pub fn opaque<'p>(
        operation: &str,
        wired_ports: impl IntoIterator<Item = &'p str>,
        valued_ports: impl IntoIterator<Item = &'p str>,
    ) -> Self {
        let mut inputs: Vec<PortDef> = Vec::new();
        for port in valued_ports {
            if !inputs.iter().any(|p| p.id == port) {
                inputs.push(PortDef::new(port, port, PortType::Any, true));
            }
        }
        for port in wired_ports {
            if !inputs.iter().any(|p| p.id == port) {
                inputs.push(PortDef::new(port, port, PortType::Any, false));
            }
        }
        Self {
            id: operation.to_string(),
            name: operation.to_string(),
            category: String::new(),
            description: String::new(),
            inputs,
            outputs: Vec::new(),
            tlang_type: operation.to_string(),
        }
    }

    pub fn input(&self, port: &str) -> Option<&PortDef> {
        self.inputs.iter().find(|p| p.id == port)
    }

    pub fn required_inputs(&self) -> impl Iterator<Item = &PortDef> {
        self.inputs.iter().filter(|p| p.required)
    }

    /// The port a downstream reference reads by default: the first declared output, else `out`.
    pub fn primary_output(&self) -> &str {
        self.outputs
            .first()
            .map(|p| p.id.as_str())
            .unwrap_or(crate::graph::DEFAULT_SOURCE_PORT)
    }
}

/// Lookup from operation identity to signature, plus the names the combinator
/// library exports at top level.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: IndexMap<String, OperationSignature>,
    top_level_exports: AHashSet<String>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl OperationRegistry {
    /// An empty registry that still knows the fixed top-level export names.
    pub fn new() -> Self {
        Self {
            operations: IndexMap::new(),
            top_level_exports: TOP_LEVEL_EXPORTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A registry holding the default combinator catalog.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        catalog::register_default_operations(&mut registry);
        registry
    }

    pub fn register(&mut self, signature: OperationSignature) {
        self.operations.insert(signature.id.clone(), signature);
    }

    pub fn register_top_level_export(&mut self, name: &str) {
        self.top_level_exports.insert(name.to_string());
    }

    pub fn get(&self, id: &str) -> Option<&OperationSignature> {
        self.operations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.operations.contains_key(id)
    }

    pub fn is_top_level_export(&self, name: &str) -> bool {
        self.top_level_exports.contains(name)
    }

    pub fn top_level_exports(&self) -> &AHashSet<String> {
        &self.top_level_exports
    }

    /// All signatures in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationSignature> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registers every signature in a JSON array file, replacing same-id entries.
    pub fn extend_from_file(&mut self, path: &str) -> Result<usize, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let signatures: Vec<OperationSignature> =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        let count = signatures.len();
        for signature in signatures {
            self.register(signature);
        }
        Ok(count)
    }
}
