use serde::Serialize;

use crate::graph::FolderTree;
use crate::projection::model::Projection;

/// Summary of a loaded graph and of one projection of it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LayoutStats {
    pub file_count: usize,
    /// Folders, excluding the synthetic root.
    pub folder_count: usize,
    pub max_depth: usize,
    /// Edges in the input, routable or not.
    pub edge_count: usize,
    pub visible_nodes: usize,
    pub active_edges: usize,
    pub suppressed_edges: usize,
    pub dangling_edges: usize,
    /// Width and height of the whole diagram.
    pub canvas_width: u32,
    pub canvas_height: u32,
}

/// Compute statistics for `projection`, which must come from `tree`.
pub fn layout_stats(tree: &FolderTree, edge_count: usize, projection: &Projection) -> LayoutStats {
    let root = &tree.graph[tree.root].geometry;
    LayoutStats {
        file_count: tree.file_count(),
        folder_count: tree.container_count().saturating_sub(1),
        max_depth: tree.max_depth(),
        edge_count,
        visible_nodes: projection.nodes.len(),
        active_edges: projection.active_edges().count(),
        suppressed_edges: projection.suppressed_count(),
        dangling_edges: projection.skipped.len(),
        canvas_width: root.width,
        canvas_height: root.height,
    }
}
