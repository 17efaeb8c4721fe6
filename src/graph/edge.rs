/// The kind of directed edge stored in the folder tree.
///
/// Dependency edges are not stored here: they stay in the caller's flat list
/// and are routed against the tree at projection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Folder -> child (folder or file).
    Contains,
}
