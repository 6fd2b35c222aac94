use super::definition::Graph;
use crate::error::GraphConversionError;

/// A trait for custom editor formats that can be converted into a typeflow `Graph`.
///
/// Implement this on the top-level struct of your own canvas format to feed it
/// into the compiler. The bundled [`EditorDocument`](crate::editor::EditorDocument)
/// is one such implementation.
///
/// # Example
///
/// ```rust,no_run
/// use typeflow::prelude::*;
/// use typeflow::error::GraphConversionError;
///
/// struct MyBox { key: String, op: String }
/// struct MyCanvas { boxes: Vec<MyBox> }
///
/// impl IntoGraph for MyCanvas {
///     fn into_graph(self) -> std::result::Result<Graph, GraphConversionError> {
///         let nodes = self
///             .boxes
///             .into_iter()
///             .map(|b| GraphNode::new(b.key, b.op))
///             .collect();
///         Ok(Graph::new(nodes, vec![]))
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a graph snapshot.
    fn into_graph(self) -> Result<Graph, GraphConversionError>;
}

impl IntoGraph for Graph {
    fn into_graph(self) -> Result<Graph, GraphConversionError> {
        Ok(self)
    }
}
