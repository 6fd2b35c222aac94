use crate::compiler::Compiler;
use crate::editor::graph_from_json;
use pyo3::prelude::*;

/// A graph-to-source compiler for type-level transformation graphs.
///
/// The compiler is built once with the default operation catalog and can then
/// be called repeatedly; it holds no state between calls.
#[pyclass(name = "TypeFlow")]
struct TypeFlowPy {
    compiler: Compiler,
}

#[pymethods]
impl TypeFlowPy {
    #[new]
    fn new() -> Self {
        TypeFlowPy {
            compiler: Compiler::default(),
        }
    }

    /// Generates the source text for a graph.
    ///
    /// Args:
    ///     graph_json (str): The graph, either in canonical form or as saved
    ///         by the canvas editor.
    ///     name_hint (str): Name of the combined result alias. Defaults to
    ///         "Result" when empty.
    ///
    /// Returns:
    ///     str: The emitted source, or a placeholder comment for an empty graph.
    ///
    /// Raises:
    ///     ValueError: If the JSON is malformed.
    #[pyo3(signature = (graph_json, name_hint = ""))]
    fn generate(&self, graph_json: &str, name_hint: &str) -> PyResult<String> {
        let graph = graph_from_json(graph_json)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        Ok(self.compiler.generate(&graph, name_hint))
    }

    /// Lists the structural problems of a graph. An empty list means valid.
    ///
    /// Raises:
    ///     ValueError: If the JSON is malformed.
    fn validate(&self, graph_json: &str) -> PyResult<Vec<String>> {
        let graph = graph_from_json(graph_json)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        Ok(self.compiler.validate(&graph))
    }
}

/// Python bindings to the typeflow compiler.
#[pymodule]
fn typeflow(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<TypeFlowPy>()?;
    Ok(())
}
