use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Names and formatting used in the emitted source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Module the import statement reads from.
    pub module: String,
    /// The DAG-declaration macro.
    pub dag_macro: String,
    /// The execute macro.
    pub exec_macro: String,
    /// The output-extraction macro.
    pub out_macro: String,
    /// Components are named `<prefix>_1`, `<prefix>_2`, ...
    pub component_prefix: String,
    /// Combined result alias used when the caller's name hint is blank.
    pub result_alias: String,
    pub indent: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            module: "tlang".to_string(),
            dag_macro: "DAG".to_string(),
            exec_macro: "Exec".to_string(),
            out_macro: "Out".to_string(),
            component_prefix: "TypeFlow".to_string(),
            result_alias: "Result".to_string(),
            indent: "  ".to_string(),
        }
    }
}

impl CompilerOptions {
    /// Loads options from a JSON file; missing fields keep their defaults.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// The three names every emitted file imports.
    pub fn macro_names(&self) -> [&str; 3] {
        [&self.dag_macro, &self.exec_macro, &self.out_macro]
    }

    pub fn component_alias(&self, index: usize) -> String {
        format!("{}_{}", self.component_prefix, index + 1)
    }

    pub fn component_result_alias(&self, index: usize) -> String {
        format!("{}_{}_Result", self.component_prefix, index + 1)
    }
}
