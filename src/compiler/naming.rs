use super::sanitize::sanitize;
use crate::graph::GraphNode;
use ahash::{AHashMap, AHashSet};

/// Words that cannot name a type alias in the emitted file.
const RESERVED_WORDS: &[&str] = &[
    "any", "as", "bigint", "boolean", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "infer", "instanceof",
    "interface", "is", "keyof", "let", "never", "new", "null", "number", "object", "package",
    "private", "protected", "public", "readonly", "return", "static", "string", "super",
    "switch", "symbol", "this", "throw", "true", "try", "type", "typeof", "undefined",
    "unique", "unknown", "var", "void", "while", "with", "yield",
];

/// Binding names for every node of one graph.
///
/// Assigned once, in node-array order. A sanitized id that is already taken by an
/// earlier node, by a reserved name or by a language keyword gets the first free
/// `_2`, `_3`, ... suffix.
#[derive(Debug, Default)]
pub struct NameTable {
    taken: AHashSet<String>,
    bindings: AHashMap<String, String>,
}

impl NameTable {
    /// `reserved` are names the emitted file defines or imports besides node bindings.
    pub fn new<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        let mut taken: AHashSet<String> = RESERVED_WORDS.iter().map(|w| w.to_string()).collect();
        taken.extend(reserved.into_iter().map(str::to_string));
        Self {
            taken,
            bindings: AHashMap::new(),
        }
    }

    /// Assigns names to `nodes` in order. Repeated ids keep their first name.
    pub fn assign_all<'a>(&mut self, nodes: impl IntoIterator<Item = &'a GraphNode>) {
        for node in nodes {
            self.assign(&node.id);
        }
    }

    pub fn assign(&mut self, id: &str) -> &str {
        if !self.bindings.contains_key(id) {
            let binding = self.unique(sanitize(id));
            self.bindings.insert(id.to_string(), binding);
        }
        &self.bindings[id]
    }

    /// Reserves a name for an alias that is not a node binding. A taken name is
    /// suffixed like a node binding would be.
    pub fn claim(&mut self, name: &str) -> String {
        self.unique(sanitize(name))
    }

    fn unique(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        if candidate != base {
            tracing::debug!(name = %base, resolved = %candidate, "name collision resolved");
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    /// The binding for a node id, falling back to the plain sanitized id for unknown ids.
    pub fn binding(&self, id: &str) -> String {
        self.bindings
            .get(id)
            .cloned()
            .unwrap_or_else(|| sanitize(id))
    }
}
