pub mod model;

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;

use crate::error::GraphError;
use crate::graph::FolderTree;
use crate::input::SourceEdge;
use crate::layout::state::CollapseState;

use model::{EdgeStyle, PositionedNode, Projection, RoutedEdge};

/// Project the tree and the full edge list onto what is visible under `state`.
///
/// Steps:
/// 1. Build a child -> parent map in one walk of the tree.
/// 2. Emit folders depth-first, descending only into expanded ones.
/// 3. Route each edge to the visible ancestors of its endpoints; edges whose
///    ends meet in one node are suppressed, the rest flag both ends as external.
/// 4. Attach the external flags to the emitted nodes.
///
/// Reads the geometry left by the last layout pass; never mutates anything.
pub fn project(tree: &FolderTree, edges: &[SourceEdge], state: &CollapseState) -> Projection {
    let parents = parent_map(tree);

    let mut emitted: Vec<NodeIndex> = Vec::new();
    collect_visible(tree, tree.root, state, &mut emitted);

    let mut external: HashSet<NodeIndex> = HashSet::new();
    let mut routed = Vec::with_capacity(edges.len());
    let mut skipped = Vec::new();

    for (ordinal, edge) in edges.iter().enumerate() {
        let ends = resolve(tree, ordinal, &edge.source)
            .and_then(|s| resolve(tree, ordinal, &edge.target).map(|t| (s, t)));
        let (source_idx, target_idx) = match ends {
            Ok(pair) => pair,
            Err(err) => {
                tracing::warn!("skipping edge: {err}");
                skipped.push(err);
                continue;
            }
        };

        let source_visible = visible_ancestor(tree, &parents, source_idx, state);
        let target_visible = visible_ancestor(tree, &parents, target_idx, state);
        let is_suppressed = source_visible == target_visible;
        if !is_suppressed {
            external.insert(source_visible);
            external.insert(target_visible);
        }

        routed.push(RoutedEdge {
            id: format!("e-{}-{}-{}", edge.source, edge.target, ordinal),
            source: edge.source.clone(),
            target: edge.target.clone(),
            source_visible: tree.graph[source_visible].id.clone(),
            target_visible: tree.graph[target_visible].id.clone(),
            is_suppressed,
            style: EdgeStyle::for_edge(is_suppressed),
        });
    }

    let nodes = emitted
        .into_iter()
        .map(|idx| {
            let node = &tree.graph[idx];
            PositionedNode {
                id: node.id.clone(),
                kind: node.kind,
                x: node.geometry.x,
                y: node.geometry.y,
                width: node.geometry.width,
                height: node.geometry.height,
                color: node.color.clone(),
                label: node.label().to_owned(),
                dependency_count: node.dependency_count(),
                has_external_edges: external.contains(&idx),
                parent_id: parents.get(&idx).map(|&p| tree.graph[p].id.clone()),
            }
        })
        .collect();

    Projection {
        nodes,
        edges: routed,
        skipped,
    }
}

/// The node an endpoint is drawn as: its outermost collapsed ancestor, or
/// itself when every folder above it is expanded.
pub fn visible_ancestor(
    tree: &FolderTree,
    parents: &HashMap<NodeIndex, NodeIndex>,
    idx: NodeIndex,
    state: &CollapseState,
) -> NodeIndex {
    let mut visible = idx;
    let mut current = idx;
    while let Some(&parent) = parents.get(&current) {
        if state.is_collapsed(&tree.graph[parent].id) {
            visible = parent;
        }
        current = parent;
    }
    visible
}

/// Child -> parent for every non-root node.
pub fn parent_map(tree: &FolderTree) -> HashMap<NodeIndex, NodeIndex> {
    let mut parents = HashMap::with_capacity(tree.graph.node_count());
    let mut stack = vec![tree.root];
    while let Some(idx) = stack.pop() {
        for child in tree.children(idx) {
            parents.insert(child, idx);
            stack.push(child);
        }
    }
    parents
}

fn collect_visible(
    tree: &FolderTree,
    idx: NodeIndex,
    state: &CollapseState,
    out: &mut Vec<NodeIndex>,
) {
    out.push(idx);
    let node = &tree.graph[idx];
    if node.is_container() && state.is_expanded(&node.id) {
        for child in tree.ordered_children(idx) {
            collect_visible(tree, child, state, out);
        }
    }
}

fn resolve(tree: &FolderTree, ordinal: usize, id: &str) -> Result<NodeIndex, GraphError> {
    tree.index
        .get(id)
        .copied()
        .ok_or_else(|| GraphError::DanglingEdgeReference {
            edge: ordinal,
            id: id.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeKind;
    use crate::input::SourceNode;
    use crate::layout::{HEADER_HEIGHT, layout};

    fn fixture() -> (FolderTree, Vec<SourceEdge>) {
        let nodes = vec![
            SourceNode::new("a/x.py", "x.py"),
            SourceNode::new("a/y.py", "y.py"),
            SourceNode::new("b/z.py", "z.py"),
        ];
        let edges = vec![SourceEdge::new("a/x.py", "b/z.py")];
        (FolderTree::build(&nodes).unwrap(), edges)
    }

    fn default_state(tree: &FolderTree) -> CollapseState {
        CollapseState::with_open_depth(tree, 1)
    }

    fn ids(projection: &Projection) -> Vec<&str> {
        projection.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_default_state_routes_between_folders() {
        let (mut tree, edges) = fixture();
        let state = default_state(&tree);
        layout(&mut tree, &state);
        let projection = project(&tree, &edges, &state);

        assert_eq!(ids(&projection), vec!["root", "a", "b"]);
        let edge = &projection.edges[0];
        assert_eq!(edge.source_visible, "a");
        assert_eq!(edge.target_visible, "b");
        assert!(!edge.is_suppressed);
        assert!(projection.node("a").unwrap().has_external_edges);
        assert!(projection.node("b").unwrap().has_external_edges);
        assert!(!projection.node("root").unwrap().has_external_edges);
    }

    #[test]
    fn test_expanding_source_folder_reveals_file_endpoint() {
        let (mut tree, edges) = fixture();
        let mut state = default_state(&tree);
        state.set("a", true);
        layout(&mut tree, &state);
        let projection = project(&tree, &edges, &state);

        assert_eq!(ids(&projection), vec!["root", "a", "a/x.py", "a/y.py", "b"]);
        let edge = &projection.edges[0];
        assert_eq!(edge.source_visible, "a/x.py");
        assert_eq!(edge.target_visible, "b");
        assert!(projection.node("a/x.py").unwrap().has_external_edges);
        assert!(!projection.node("a/y.py").unwrap().has_external_edges);
        assert!(!projection.node("a").unwrap().has_external_edges);
    }

    #[test]
    fn test_edge_inside_collapsed_folder_is_suppressed() {
        let (tree, _) = fixture();
        let edges = vec![SourceEdge::new("a/x.py", "a/y.py")];
        let state = default_state(&tree);
        let projection = project(&tree, &edges, &state);

        let edge = &projection.edges[0];
        assert!(edge.is_suppressed);
        assert_eq!(edge.source_visible, "a");
        assert_eq!(edge.target_visible, "a");
        assert_eq!(edge.source, "a/x.py", "original endpoints are kept");
        assert!(edge.style.hidden);
        assert!(!projection.node("a").unwrap().has_external_edges);
    }

    #[test]
    fn test_outermost_collapsed_ancestor_wins() {
        let nodes = vec![
            SourceNode::new("a/b/c/deep.rs", "deep.rs"),
            SourceNode::new("top.rs", "top.rs"),
        ];
        let tree = FolderTree::build(&nodes).unwrap();
        let edges = vec![SourceEdge::new("a/b/c/deep.rs", "top.rs")];

        let mut state = CollapseState::new();
        state.set("a/b", false);
        state.set("a/b/c", false);
        let projection = project(&tree, &edges, &state);
        assert_eq!(projection.edges[0].source_visible, "a/b");
        assert_eq!(projection.edges[0].target_visible, "top.rs");
        assert_eq!(ids(&projection), vec!["root", "a", "a/b", "top.rs"]);
    }

    #[test]
    fn test_collapsing_hides_descendants_and_reroutes() {
        let nodes = vec![
            SourceNode::new("lib/core/a.rs", "a.rs"),
            SourceNode::new("lib/b.rs", "b.rs"),
            SourceNode::new("main.rs", "main.rs"),
        ];
        let mut tree = FolderTree::build(&nodes).unwrap();
        let edges = vec![
            SourceEdge::new("main.rs", "lib/core/a.rs"),
            SourceEdge::new("lib/b.rs", "main.rs"),
        ];

        let mut state = CollapseState::new();
        state.set("lib", false);
        layout(&mut tree, &state);
        let projection = project(&tree, &edges, &state);

        assert!(
            projection.nodes.iter().all(|n| !n.id.starts_with("lib/")),
            "no descendant of a collapsed folder is emitted"
        );
        let lib = projection.node("lib").unwrap();
        assert_eq!(lib.height, HEADER_HEIGHT);
        assert_eq!(lib.width, 150);
        assert_eq!(projection.edges[0].target_visible, "lib");
        assert_eq!(projection.edges[1].source_visible, "lib");
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let (tree, _) = fixture();
        let edges = vec![
            SourceEdge::new("a/x.py", "missing.py"),
            SourceEdge::new("a/x.py", "b/z.py"),
        ];
        let projection = project(&tree, &edges, &default_state(&tree));

        assert_eq!(projection.edges.len(), 1);
        assert_eq!(projection.edges[0].id, "e-a/x.py-b/z.py-1", "ordinal is the input position");
        assert_eq!(
            projection.skipped,
            vec![GraphError::DanglingEdgeReference {
                edge: 0,
                id: "missing.py".into()
            }]
        );
    }

    #[test]
    fn test_skipped_edges_survive_clone_and_serialize() {
        let (tree, _) = fixture();
        let edges = vec![SourceEdge::new("ghost.py", "a/x.py")];
        let projection = project(&tree, &edges, &default_state(&tree));

        let copy = projection.clone();
        assert_eq!(copy, projection);

        let json = serde_json::to_value(&projection).expect("projection serializes");
        assert_eq!(
            json["skipped"],
            serde_json::json!(["edge #0 references unknown node `ghost.py`"])
        );
    }

    #[test]
    fn test_duplicate_edges_get_distinct_ids() {
        let (tree, _) = fixture();
        let edges = vec![
            SourceEdge::new("a/x.py", "b/z.py"),
            SourceEdge::new("a/x.py", "b/z.py"),
        ];
        let projection = project(&tree, &edges, &CollapseState::new());
        assert_ne!(projection.edges[0].id, projection.edges[1].id);
        assert_eq!(projection.active_edges().count(), 2);
    }

    #[test]
    fn test_self_loop_is_suppressed() {
        let (tree, _) = fixture();
        let edges = vec![SourceEdge::new("b/z.py", "b/z.py")];
        let projection = project(&tree, &edges, &CollapseState::new());
        assert!(projection.edges[0].is_suppressed);
        assert_eq!(projection.suppressed_count(), 1);
    }

    #[test]
    fn test_collapsed_root_hides_everything() {
        let (tree, edges) = fixture();
        let mut state = CollapseState::new();
        state.set("root", false);
        let projection = project(&tree, &edges, &state);
        assert_eq!(ids(&projection), vec!["root"]);
        assert!(projection.edges[0].is_suppressed);
    }

    #[test]
    fn test_nodes_carry_parent_and_source_fields() {
        let nodes = vec![SourceNode {
            id: "pkg/mod.rs".into(),
            label: String::new(),
            dependency_count: 4,
        }];
        let tree = FolderTree::build(&nodes).unwrap();
        let projection = project(&tree, &[], &CollapseState::new());

        let root = projection.node("root").unwrap();
        assert_eq!(root.parent_id, None);
        assert_eq!(root.label, "Project Root");
        assert_eq!(root.kind, NodeKind::Container);

        let file = projection.node("pkg/mod.rs").unwrap();
        assert_eq!(file.parent_id.as_deref(), Some("pkg"));
        assert_eq!(file.label, "mod.rs", "blank label falls back to the file name");
        assert_eq!(file.dependency_count, 4);
        assert_eq!(file.kind, NodeKind::Leaf);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let (mut tree, edges) = fixture();
        let state = CollapseState::new();
        layout(&mut tree, &state);
        let first = project(&tree, &edges, &state);
        let second = project(&tree, &edges, &state);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
