use super::parser::parse_type_expr;
use crate::registry::OperationRegistry;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Names an emitted file has to import from the combinator library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    /// Root namespaces of qualified references (`Strings` for `Strings.CamelCase`).
    pub namespaces: BTreeSet<String>,
    /// Bare top-level operation names (`Pick`).
    pub operations: BTreeSet<String>,
}

impl ImportSet {
    pub fn merge(&mut self, other: ImportSet) {
        self.namespaces.extend(other.namespaces);
        self.operations.extend(other.operations);
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.operations.is_empty()
    }

    /// Namespaces and operations together, sorted and deduplicated.
    pub fn names(&self) -> Vec<&str> {
        self.namespaces
            .iter()
            .merge(self.operations.iter())
            .dedup()
            .map(String::as_str)
            .collect()
    }
}

/// Discovers which library names a type expression depends on.
pub struct ReferenceExtractor<'r> {
    registry: &'r OperationRegistry,
}

impl<'r> ReferenceExtractor<'r> {
    pub fn new(registry: &'r OperationRegistry) -> Self {
        Self { registry }
    }

    /// Extracts the imports used by one type expression.
    ///
    /// Text that does not parse contributes nothing.
    pub fn extract(&self, type_text: &str) -> ImportSet {
        let mut imports = ImportSet::default();
        let expr = match parse_type_expr(type_text) {
            Ok(expr) => expr,
            Err(e) => {
                tracing::warn!(type_text, error = %e, "skipping unparseable type expression");
                return imports;
            }
        };

        expr.walk_references(&mut |path| match path {
            [] => {}
            [name] => {
                if self.registry.is_top_level_export(name) {
                    imports.operations.insert(name.clone());
                }
            }
            [root, ..] => {
                imports.namespaces.insert(root.clone());
            }
        });
        imports
    }

    /// Extracts and merges the imports of many type expressions.
    pub fn extract_all<'a>(&self, type_texts: impl IntoIterator<Item = &'a str>) -> ImportSet {
        let mut imports = ImportSet::default();
        for text in type_texts {
            imports.merge(self.extract(text));
        }
        imports
    }
}
