use crate::config::LayoutConfig;
use crate::error::GraphError;
use crate::graph::FolderTree;
use crate::graph::color::{assign_colors, default_palette};
use crate::input::{GraphInput, SourceEdge};
use crate::layout::layout;
use crate::layout::state::{CollapseState, DEFAULT_OPEN_DEPTH};
use crate::projection::model::Projection;
use crate::projection::project;

/// Tree and edges kept between recomputations.
#[derive(Debug, Clone)]
struct CachedGraph {
    tree: FolderTree,
    edges: Vec<SourceEdge>,
    initial_state: CollapseState,
}

/// One loaded graph and everything needed to re-lay it out on each toggle.
///
/// The tree is built once per [`load`](Self::load); [`recompute`](Self::recompute)
/// only reruns layout and projection. Sessions share nothing, so each view
/// of a graph can own its own.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    cache: Option<CachedGraph>,
    palette: Vec<String>,
    open_depth: usize,
    exclude: Vec<glob::Pattern>,
}

impl LayoutSession {
    pub fn new() -> Self {
        Self {
            cache: None,
            palette: default_palette(),
            open_depth: DEFAULT_OPEN_DEPTH,
            exclude: Vec::new(),
        }
    }

    /// Session using the palette, open depth and exclusions from `config`.
    pub fn with_config(config: &LayoutConfig) -> Self {
        Self {
            cache: None,
            palette: config.palette(),
            open_depth: config.open_depth(),
            exclude: config.exclude_patterns(),
        }
    }

    /// Parse, validate and load a JSON graph. See [`load`](Self::load).
    pub fn load_json(&mut self, text: &str) -> Result<CollapseState, GraphError> {
        match GraphInput::from_json(text) {
            Ok(input) => self.load(input),
            Err(err) => {
                self.cache = None;
                Err(err)
            }
        }
    }

    /// Build the tree for `input`, colour it and cache it with the edge list.
    ///
    /// Returns the initial collapse state for the caller to keep and edit. On
    /// error the session is left empty: a failed load never leaves a partial
    /// tree behind, nor the previous graph.
    pub fn load(&mut self, mut input: GraphInput) -> Result<CollapseState, GraphError> {
        self.cache = None;

        let excluded = input.exclude(&self.exclude);
        if excluded > 0 {
            tracing::debug!("excluded {excluded} node(s) by pattern");
        }

        let mut tree = FolderTree::build(&input.nodes)?;
        assign_colors(&mut tree, &self.palette);
        let initial_state = CollapseState::with_open_depth(&tree, self.open_depth);

        tracing::info!(
            "loaded graph: {} files, {} folders, {} edges",
            tree.file_count(),
            tree.container_count(),
            input.edges.len()
        );

        self.cache = Some(CachedGraph {
            tree,
            edges: input.edges,
            initial_state: initial_state.clone(),
        });
        Ok(initial_state)
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    pub fn tree(&self) -> Option<&FolderTree> {
        self.cache.as_ref().map(|c| &c.tree)
    }

    /// The edge list exactly as loaded (after exclusions).
    pub fn edges(&self) -> &[SourceEdge] {
        match &self.cache {
            Some(cache) => &cache.edges,
            None => &[],
        }
    }

    /// The state returned by the last successful load.
    pub fn initial_state(&self) -> Option<&CollapseState> {
        self.cache.as_ref().map(|c| &c.initial_state)
    }

    /// Lay out and project the cached graph under `state`.
    pub fn try_recompute(&mut self, state: &CollapseState) -> Result<Projection, GraphError> {
        let cache = self.cache.as_mut().ok_or(GraphError::UninitializedCache)?;
        layout(&mut cache.tree, state);
        let projection = project(&cache.tree, &cache.edges, state);
        tracing::debug!(
            "recomputed: {} visible nodes, {} drawn edges, {} suppressed",
            projection.nodes.len(),
            projection.active_edges().count(),
            projection.suppressed_count()
        );
        Ok(projection)
    }

    /// Like [`try_recompute`](Self::try_recompute), but an unloaded session
    /// yields an empty projection instead of an error.
    pub fn recompute(&mut self, state: &CollapseState) -> Projection {
        self.try_recompute(state).unwrap_or_else(|err| {
            tracing::debug!("{err}; returning empty projection");
            Projection::default()
        })
    }

    /// Record a toggle in the caller's `state` and recompute.
    ///
    /// Once a graph is loaded, `id` must name a folder; otherwise `state` is
    /// left as it was and `UnknownContainer` is returned.
    pub fn set_collapsed(
        &mut self,
        state: &mut CollapseState,
        id: &str,
        expanded: bool,
    ) -> Result<Projection, GraphError> {
        if let Some(tree) = self.tree() {
            match tree.get(id) {
                Some(node) if node.is_container() => {}
                _ => {
                    tracing::warn!("ignoring toggle of `{id}`: not a folder");
                    return Err(GraphError::UnknownContainer(id.to_owned()));
                }
            }
        }
        state.set(id, expanded);
        Ok(self.recompute(state))
    }
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new()
    }
}
