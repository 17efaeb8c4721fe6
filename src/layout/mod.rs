pub mod state;

use petgraph::stable_graph::NodeIndex;

use crate::graph::FolderTree;
use crate::graph::node::Geometry;

use state::CollapseState;

/// Every file box has the same size so rows pack predictably.
pub const LEAF_WIDTH: u32 = 220;
pub const LEAF_HEIGHT: u32 = 70;
/// Height of a folder's title bar; also the full height of a collapsed folder.
pub const HEADER_HEIGHT: u32 = 60;
/// Inset between a folder's border and its children.
pub const PADDING: u32 = 40;
/// Space between neighbouring children, horizontally and between rows.
pub const GAP: u32 = 20;

const MIN_ROW_WIDTH: u32 = 800;
const ROW_SLOT_WIDTH: u32 = 260;
const COLLAPSED_MIN_WIDTH: u32 = 150;
const COLLAPSED_MAX_WIDTH: u32 = 1000;
const LABEL_CHAR_WIDTH: u32 = 11;
const LABEL_PADDING: u32 = 60;

/// Recompute the geometry of every reachable node from scratch.
///
/// Children of collapsed folders are skipped and keep whatever geometry they
/// had; nothing reads it until the folder is expanded, at which point it is
/// recomputed. The root is pinned at (0, 0).
pub fn layout(tree: &mut FolderTree, state: &CollapseState) {
    let root = tree.root;
    let geometry = &mut tree.graph[root].geometry;
    geometry.x = 0;
    geometry.y = 0;
    layout_node(tree, root, state);
}

fn layout_node(tree: &mut FolderTree, idx: NodeIndex, state: &CollapseState) {
    let node = &tree.graph[idx];

    if !node.is_container() {
        let geometry = &mut tree.graph[idx].geometry;
        geometry.width = LEAF_WIDTH;
        geometry.height = LEAF_HEIGHT;
        return;
    }

    if state.is_collapsed(&node.id) {
        let width = collapsed_width(&node.name);
        let geometry = &mut tree.graph[idx].geometry;
        geometry.width = width;
        geometry.height = HEADER_HEIGHT;
        return;
    }

    let children = tree.ordered_children(idx);
    for &child in &children {
        layout_node(tree, child, state);
    }

    let sizes: Vec<(u32, u32)> = children
        .iter()
        .map(|&c| {
            let g = &tree.graph[c].geometry;
            (g.width, g.height)
        })
        .collect();
    let packing = pack_rows(&sizes);

    for (&child, &(x, y)) in children.iter().zip(&packing.positions) {
        let geometry = &mut tree.graph[child].geometry;
        geometry.x = x;
        geometry.y = y;
    }
    let geometry = &mut tree.graph[idx].geometry;
    geometry.width = packing.width;
    geometry.height = packing.height;
}

/// Width of a collapsed folder: grows with its name, clamped to [150, 1000].
pub fn collapsed_width(name: &str) -> u32 {
    let chars = u32::try_from(name.chars().count()).unwrap_or(u32::MAX);
    chars
        .saturating_mul(LABEL_CHAR_WIDTH)
        .saturating_add(LABEL_PADDING)
        .clamp(COLLAPSED_MIN_WIDTH, COLLAPSED_MAX_WIDTH)
}

/// Row budget for a folder with `count` children: roughly square, never below 800.
pub fn max_row_width(count: usize) -> u32 {
    let side = (count as f64).sqrt().ceil() as u32;
    MIN_ROW_WIDTH.max(side.saturating_mul(ROW_SLOT_WIDTH))
}

/// Result of packing a folder's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPacking {
    /// Top-left corner of each child, relative to the folder, in input order.
    pub positions: Vec<(u32, u32)>,
    /// Folder width: the widest row extent, trailing gap included.
    pub width: u32,
    /// Folder height: header, rows, and padding above and below.
    pub height: u32,
}

/// Greedy left-to-right, top-to-bottom placement of `(width, height)` boxes.
///
/// A box wraps to a new row when it would cross the row budget, unless it is
/// the first on its row: an oversized child gets a row to itself.
pub fn pack_rows(sizes: &[(u32, u32)]) -> RowPacking {
    let limit = max_row_width(sizes.len());

    let mut positions = Vec::with_capacity(sizes.len());
    let mut cursor_x = PADDING;
    let mut cursor_y = PADDING + HEADER_HEIGHT;
    let mut row_height = 0;
    let mut max_width = PADDING;

    for &(width, height) in sizes {
        if cursor_x + width > limit && cursor_x > PADDING {
            cursor_x = PADDING;
            cursor_y += row_height + GAP;
            row_height = 0;
        }

        positions.push((cursor_x, cursor_y));

        cursor_x += width + GAP;
        row_height = row_height.max(height);
        max_width = max_width.max(cursor_x);
    }

    RowPacking {
        positions,
        width: max_width,
        height: cursor_y + row_height + PADDING,
    }
}

/// Absolute top-left corner of `idx`, summing offsets up to the root.
pub fn absolute_position(tree: &FolderTree, idx: NodeIndex) -> (u32, u32) {
    let mut x = 0;
    let mut y = 0;
    let mut current = Some(idx);
    while let Some(i) = current {
        let g: &Geometry = &tree.graph[i].geometry;
        x += g.x;
        y += g.y;
        current = tree.parent(i);
    }
    (x, y)
}
