pub mod dot;
pub mod mermaid;
pub mod model;

use std::collections::{BTreeMap, HashMap};

use crate::graph::node::NodeKind;
use crate::layout::state::CollapseState;
use crate::projection::model::{PositionedNode, Projection};

use model::{ExportFormat, ExportResult};

/// Mermaid struggles past this many edges.
const MERMAID_EDGE_LIMIT: usize = 500;

/// Render a projection as DOT or Mermaid text.
///
/// Steps:
/// 1. Index the visible nodes by position and group them under their parents.
/// 2. Merge drawn edges that connect the same pair of visible nodes.
/// 3. Check scale guards and collect warnings.
/// 4. Dispatch to the appropriate renderer.
pub fn export_projection(
    projection: &Projection,
    state: &CollapseState,
    format: ExportFormat,
) -> ExportResult {
    let view = ExportView::new(projection, state);

    let node_count = projection
        .nodes
        .iter()
        .filter(|n| !view.is_cluster(n))
        .count();
    let edge_count = view.edges.len();

    let mut warnings: Vec<String> = Vec::new();
    if format == ExportFormat::Mermaid && edge_count > MERMAID_EDGE_LIMIT {
        let msg = format!(
            "Large graph: {} edges may render poorly in Mermaid. \
             Collapse more folders or use --format dot.",
            edge_count
        );
        tracing::warn!("{msg}");
        warnings.push(msg);
    }

    let content = match format {
        ExportFormat::Dot => dot::render_dot(&view),
        ExportFormat::Mermaid => mermaid::render_mermaid(&view),
    };

    ExportResult {
        content,
        node_count,
        edge_count,
        warnings,
    }
}

/// Visible nodes arranged for nested rendering.
pub struct ExportView<'a> {
    pub nodes: &'a [PositionedNode],
    state: &'a CollapseState,
    /// Parent id -> positions of its visible children, in display order.
    children: HashMap<&'a str, Vec<usize>>,
    /// (source position, target position) -> number of merged edges.
    pub edges: BTreeMap<(usize, usize), usize>,
}

impl<'a> ExportView<'a> {
    pub fn new(projection: &'a Projection, state: &'a CollapseState) -> Self {
        let position: HashMap<&str, usize> = projection
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, node) in projection.nodes.iter().enumerate() {
            if let Some(parent) = node.parent_id.as_deref() {
                children.entry(parent).or_default().push(i);
            }
        }

        let mut edges = BTreeMap::new();
        for edge in projection.active_edges() {
            let (Some(&src), Some(&tgt)) = (
                position.get(edge.source_visible.as_str()),
                position.get(edge.target_visible.as_str()),
            ) else {
                continue;
            };
            *edges.entry((src, tgt)).or_insert(0) += 1;
        }

        Self {
            nodes: &projection.nodes,
            state,
            children,
            edges,
        }
    }

    /// Expanded folders are drawn as containers around their children.
    pub fn is_cluster(&self, node: &PositionedNode) -> bool {
        node.kind == NodeKind::Container && self.state.is_expanded(&node.id)
    }

    pub fn children_of(&self, id: &str) -> &[usize] {
        match self.children.get(id) {
            Some(children) => children,
            None => &[],
        }
    }

    /// Positions of the nodes drawn at top level (children of the root).
    pub fn top_level(&self) -> &[usize] {
        match self.nodes.first() {
            Some(root) if self.is_cluster(root) => self.children_of(&root.id),
            Some(_) => &[0],
            None => &[],
        }
    }
}

/// Label for an edge standing in for `count` source edges.
pub fn edge_label(count: usize) -> String {
    if count == 1 {
        "1 dependency".to_string()
    } else {
        format!("{} dependencies", count)
    }
}
