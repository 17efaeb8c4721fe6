use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::FolderTree;

/// How many folder levels are open right after a load: only the root.
pub const DEFAULT_OPEN_DEPTH: usize = 1;

/// Folder id -> expanded flag. A missing entry means expanded.
///
/// Owned by the caller and only ever read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseState(BTreeMap<String, bool>);

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state after a load: folders shallower than `open_depth` are
    /// expanded, every deeper folder is collapsed. Each folder gets an explicit entry.
    pub fn with_open_depth(tree: &FolderTree, open_depth: usize) -> Self {
        let entries = tree
            .containers_with_depth()
            .into_iter()
            .map(|(idx, depth)| (tree.graph[idx].id.clone(), depth < open_depth))
            .collect();
        Self(entries)
    }

    /// Explicit flag for `id`, if one was recorded.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    /// Only an explicit `false` collapses a folder.
    pub fn is_collapsed(&self, id: &str) -> bool {
        self.get(id) == Some(false)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        !self.is_collapsed(id)
    }

    pub fn set(&mut self, id: impl Into<String>, expanded: bool) {
        self.0.insert(id.into(), expanded);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
