use super::snapshot::GraphSnapshot;
use super::{Block, Connection};
use crate::error::GraphConversionError;

/// A trait for custom data models that can be converted into a `GraphSnapshot`.
///
/// This is the extension point that keeps the engine storage-agnostic. Whatever
/// loads a form (a database row set, an editor export, a CMS payload) implements
/// this trait to translate its own records into blocks and connections.
///
/// # Example
///
/// ```rust
/// use bunki::prelude::*;
/// use bunki::error::GraphConversionError;
///
/// struct MyQuestion { key: String, position: i64 }
/// struct MyForm { questions: Vec<MyQuestion> }
///
/// impl IntoGraph for MyForm {
///     fn into_graph(self) -> Result<GraphSnapshot, GraphConversionError> {
///         let blocks = self
///             .questions
///             .into_iter()
///             .map(|q| Block::new(q.key, BlockSubtype::ShortText, q.position))
///             .collect();
///         Ok(GraphSnapshot::new(blocks, vec![]))
///     }
/// }
///
/// let form = MyForm { questions: vec![MyQuestion { key: "name".into(), position: 0 }] };
/// assert_eq!(form.into_graph().unwrap().blocks.len(), 1);
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into the engine's graph model.
    fn into_graph(self) -> Result<GraphSnapshot, GraphConversionError>;
}

impl IntoGraph for GraphSnapshot {
    fn into_graph(self) -> Result<GraphSnapshot, GraphConversionError> {
        Ok(self)
    }
}

impl IntoGraph for (Vec<Block>, Vec<Connection>) {
    fn into_graph(self) -> Result<GraphSnapshot, GraphConversionError> {
        let (blocks, connections) = self;
        for (i, block) in blocks.iter().enumerate() {
            if block.id.is_empty() {
                return Err(GraphConversionError::ValidationError(format!(
                    "block at position {} has an empty id",
                    i
                )));
            }
        }
        Ok(GraphSnapshot::new(blocks, connections))
    }
}
