use std::path::Path;

use serde::Deserialize;

use crate::graph::color::default_palette;
use crate::layout::state::DEFAULT_OPEN_DEPTH;

/// Name of the optional configuration file looked up next to the graph file.
pub const CONFIG_FILE: &str = "code-graph-layout.toml";

/// Configuration loaded from `code-graph-layout.toml`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Glob patterns on node ids; matching files (and their edges) are dropped before layout.
    pub exclude: Option<Vec<String>>,
    /// Fill colours picked from by node id. Defaults to the built-in pastel palette.
    pub palette: Option<Vec<String>>,
    /// Folders shallower than this are expanded after a load (root = depth 0).
    pub default_open_depth: Option<usize>,
}

impl LayoutConfig {
    /// Load configuration from `code-graph-layout.toml` in the given directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(dir: &Path) -> Self {
        Self::load_file(&dir.join(CONFIG_FILE))
    }

    /// Load configuration from an explicit path, with the same fallbacks as [`load`](Self::load).
    pub fn load_file(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(
                        "failed to parse {}: {err}. Using defaults.",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    "failed to read {}: {err}. Using defaults.",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn palette(&self) -> Vec<String> {
        match &self.palette {
            Some(colors) if !colors.is_empty() => colors.clone(),
            _ => default_palette(),
        }
    }

    pub fn open_depth(&self) -> usize {
        self.default_open_depth.unwrap_or(DEFAULT_OPEN_DEPTH)
    }

    /// Compiled exclusion patterns. Invalid patterns are reported and skipped.
    pub fn exclude_patterns(&self) -> Vec<glob::Pattern> {
        self.exclude
            .iter()
            .flatten()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    tracing::warn!("ignoring exclude pattern `{p}`: {err}");
                    None
                }
            })
            .collect()
    }
}
