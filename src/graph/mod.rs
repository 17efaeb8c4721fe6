pub mod color;
pub mod edge;
pub mod node;

use std::cmp::Ordering;
use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};

use crate::error::GraphError;
use crate::input::SourceNode;

use edge::EdgeKind;
use node::TreeNode;

/// Id of the synthetic root folder.
pub const ROOT_ID: &str = "root";
/// Display name of the synthetic root folder.
pub const ROOT_NAME: &str = "Project Root";

/// The folder/file containment tree: a directed petgraph StableGraph with an O(1) id index.
///
/// Containment lives only in the graph's `Contains` edges. Structure (nodes,
/// edges, colours) is fixed once built; only each node's `geometry` is
/// rewritten by the layout pass.
#[derive(Debug, Clone)]
pub struct FolderTree {
    /// Containment edges run folder -> child.
    pub graph: StableGraph<TreeNode, EdgeKind, Directed>,
    /// Maps node ids (path prefixes, file ids, `"root"`) to node indices.
    pub index: HashMap<String, NodeIndex>,
    pub root: NodeIndex,
}

impl FolderTree {
    /// Create a tree holding only the synthetic root.
    pub fn new() -> Self {
        let mut graph = StableGraph::new();
        let root = graph.add_node(TreeNode::container(ROOT_ID, ROOT_NAME));
        let mut index = HashMap::new();
        index.insert(ROOT_ID.to_owned(), root);
        Self { graph, index, root }
    }

    /// Build the tree from a flat node list by splitting each id on `/`.
    ///
    /// Every missing path prefix becomes a folder, attached to its parent in
    /// discovery order; the last segment becomes the file. Segments are used
    /// verbatim (no case folding, empty segments kept).
    pub fn build(nodes: &[SourceNode]) -> Result<Self, GraphError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert_file(node)?;
        }
        Ok(tree)
    }

    fn insert_file(&mut self, source: &SourceNode) -> Result<NodeIndex, GraphError> {
        let segments: Vec<&str> = source.id.split('/').collect();
        // `split` always yields at least one item.
        let Some((file_name, folders)) = segments.split_last() else {
            return Err(GraphError::IdCollision(source.id.clone()));
        };

        let mut parent = self.root;
        let mut prefix = String::new();
        for (i, segment) in folders.iter().enumerate() {
            if i > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if prefix == ROOT_ID {
                return Err(GraphError::IdCollision(prefix));
            }
            parent = match self.index.get(&prefix).copied() {
                Some(idx) if self.graph[idx].is_container() => idx,
                // A file already owns this prefix: "a" then "a/b".
                Some(_) => return Err(GraphError::IdCollision(prefix)),
                None => self.attach(parent, TreeNode::container(prefix.clone(), *segment)),
            };
        }

        if self.index.contains_key(&source.id) {
            return Err(GraphError::IdCollision(source.id.clone()));
        }
        Ok(self.attach(parent, TreeNode::leaf(*file_name, source.clone())))
    }

    fn attach(&mut self, parent: NodeIndex, node: TreeNode) -> NodeIndex {
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, EdgeKind::Contains);
        self.index.insert(id, idx);
        idx
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// The folder directly containing `idx`, or `None` for the root.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    /// Direct children of `idx` in discovery order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        // petgraph walks a node's edges newest first.
        children.reverse();
        children
    }

    /// Children of `idx` in display order: folders before files, each group by name.
    pub fn ordered_children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self.children(idx);
        children.sort_by(|&a, &b| {
            let (a, b) = (&self.graph[a], &self.graph[b]);
            match (a.is_container(), b.is_container()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => compare_names(&a.name, &b.name),
            }
        });
        children
    }

    /// Folders paired with their depth below the root (root = 0), in build order.
    pub fn containers_with_depth(&self) -> Vec<(NodeIndex, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &self.graph[idx];
            if !node.is_container() {
                continue;
            }
            out.push((idx, depth));
            for child in self.children(idx).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// Number of folders, including the synthetic root.
    pub fn container_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&i| self.graph[i].is_container())
            .count()
    }

    /// Number of files.
    pub fn file_count(&self) -> usize {
        self.graph.node_count() - self.container_count()
    }

    /// Deepest containment level of any node (root = 0).
    pub fn max_depth(&self) -> usize {
        self.containers_with_depth()
            .into_iter()
            .map(|(idx, depth)| {
                if self.children(idx).is_empty() {
                    depth
                } else {
                    depth + 1
                }
            })
            .max()
            .unwrap_or(0)
    }
}

/// Case-insensitive name order, with a byte-order tie-break so `A.rs` and
/// `a.rs` still sort the same way every time.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Default for FolderTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::NodeKind;

    fn sources(ids: &[&str]) -> Vec<SourceNode> {
        ids.iter()
            .map(|id| SourceNode::new(*id, id.rsplit('/').next().unwrap_or(*id)))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let tree = FolderTree::build(&[]).expect("empty build should succeed");
        assert_eq!(tree.graph.node_count(), 1);
        assert!(tree.children(tree.root).is_empty());
        assert_eq!(tree.graph.edge_count(), 0);
        assert_eq!(tree.get(ROOT_ID).map(|n| n.name.as_str()), Some(ROOT_NAME));
    }

    #[test]
    fn test_builds_folders_from_path_prefixes() {
        let tree = FolderTree::build(&sources(&["a/x.py", "a/y.py", "b/c/z.py"])).unwrap();

        let a = tree.get("a").expect("folder a");
        assert_eq!(a.kind, NodeKind::Container);
        assert_eq!(a.name, "a");
        assert_eq!(tree.children(tree.index["a"]).len(), 2);

        let c = tree.get("b/c").expect("folder b/c");
        assert_eq!(c.name, "c");
        assert_eq!(c.kind, NodeKind::Container);

        let z = tree.get("b/c/z.py").expect("file z.py");
        assert_eq!(z.kind, NodeKind::Leaf);
        assert_eq!(z.name, "z.py");
        assert!(z.source.is_some(), "leaves keep their source node");

        assert_eq!(tree.container_count(), 4, "root, a, b, b/c");
        assert_eq!(tree.file_count(), 3);
    }

    #[test]
    fn test_children_keep_discovery_order() {
        let tree = FolderTree::build(&sources(&["z.py", "m/a.py", "b.py"])).unwrap();
        let names: Vec<&str> = tree
            .children(tree.root)
            .into_iter()
            .map(|i| tree.graph[i].name.as_str())
            .collect();
        assert_eq!(names, vec!["z.py", "m", "b.py"]);
    }

    #[test]
    fn test_containment_is_stored_as_graph_edges() {
        let tree = FolderTree::build(&sources(&["a/x.py", "a/y.py", "b.py"])).unwrap();
        // root -> a, root -> b.py, a -> x.py, a -> y.py
        assert_eq!(tree.graph.edge_count(), 4);
        let a = tree.index["a"];
        for child in tree.children(a) {
            assert_eq!(tree.parent(child), Some(a));
        }
        assert!(tree.graph.edge_indices().all(|e| tree.graph[e] == EdgeKind::Contains));
    }

    #[test]
    fn test_names_sort_case_insensitively() {
        let tree = FolderTree::build(&sources(&["README.md", "main.rs", "build.rs"])).unwrap();
        let names: Vec<&str> = tree
            .ordered_children(tree.root)
            .into_iter()
            .map(|i| tree.graph[i].name.as_str())
            .collect();
        assert_eq!(names, vec!["build.rs", "main.rs", "README.md"]);
    }

    #[test]
    fn test_case_only_difference_sorts_by_bytes() {
        assert_eq!(compare_names("A.rs", "a.rs"), Ordering::Less);
        assert_eq!(compare_names("a.rs", "A.rs"), Ordering::Greater);
        assert_eq!(compare_names("a.rs", "a.rs"), Ordering::Equal);
    }

    #[test]
    fn test_ordered_children_puts_folders_first() {
        let tree = FolderTree::build(&sources(&["z.py", "m/a.py", "b.py", "c/d.py"])).unwrap();
        let names: Vec<&str> = tree
            .ordered_children(tree.root)
            .into_iter()
            .map(|i| tree.graph[i].name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "m", "b.py", "z.py"]);
    }

    #[test]
    fn test_case_is_not_normalised() {
        let tree = FolderTree::build(&sources(&["Src/a.rs", "src/a.rs"])).unwrap();
        assert!(tree.get("Src").is_some());
        assert!(tree.get("src").is_some());
        assert_eq!(tree.container_count(), 3);
    }

    #[test]
    fn test_parent_lookup() {
        let tree = FolderTree::build(&sources(&["a/b/c.rs"])).unwrap();
        let c = tree.index["a/b/c.rs"];
        let b = tree.parent(c).expect("c has a parent");
        assert_eq!(tree.graph[b].id, "a/b");
        let a = tree.parent(b).unwrap();
        assert_eq!(tree.parent(a), Some(tree.root));
        assert_eq!(tree.parent(tree.root), None);
    }

    #[test]
    fn test_duplicate_file_id_is_a_collision() {
        let err = FolderTree::build(&sources(&["a/x.py", "a/x.py"])).unwrap_err();
        assert_eq!(err, GraphError::IdCollision("a/x.py".into()));
    }

    #[test]
    fn test_file_used_as_folder_is_a_collision() {
        let err = FolderTree::build(&sources(&["a", "a/b.py"])).unwrap_err();
        assert_eq!(err, GraphError::IdCollision("a".into()));
    }

    #[test]
    fn test_root_id_is_reserved() {
        assert!(FolderTree::build(&sources(&["root"])).is_err());
        assert!(FolderTree::build(&sources(&["root/x.py"])).is_err());
    }

    #[test]
    fn test_depths() {
        let tree = FolderTree::build(&sources(&["a/b/c.rs", "d.rs"])).unwrap();
        let depths: HashMap<String, usize> = tree
            .containers_with_depth()
            .into_iter()
            .map(|(i, d)| (tree.graph[i].id.clone(), d))
            .collect();
        assert_eq!(depths["root"], 0);
        assert_eq!(depths["a"], 1);
        assert_eq!(depths["a/b"], 2);
        assert_eq!(tree.max_depth(), 3);
    }
}
