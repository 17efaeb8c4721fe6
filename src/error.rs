use thiserror::Error;

/// Errors raised while loading a graph or driving a layout session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The payload is not a graph: non-object JSON, missing `Nodes`/`Edges`,
    /// or records of the wrong shape. Nothing is built from it.
    #[error("invalid graph input: {0}")]
    InvalidGraphInput(String),

    /// An edge endpoint names an id that is not in the tree. Projection skips
    /// such edges instead of failing.
    #[error("edge #{edge} references unknown node `{id}`")]
    DanglingEdgeReference { edge: usize, id: String },

    /// `recompute` was called on a session that has never loaded a graph.
    #[error("layout session has no graph loaded")]
    UninitializedCache,

    /// Two nodes claim the same id, or a file path runs through another file.
    #[error("node id collision on `{0}`")]
    IdCollision(String),

    /// A toggle named an id that is not a container in the loaded tree.
    #[error("`{0}` is not a folder in the loaded graph")]
    UnknownContainer(String),
}
