/// Output format for graph export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum ExportFormat {
    /// Graphviz DOT (default). Expanded folders become nested clusters.
    Dot,
    /// Mermaid flowchart. Expanded folders become nested subgraphs.
    Mermaid,
}

impl ExportFormat {
    /// Conventional file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Dot => "dot",
            ExportFormat::Mermaid => "mmd",
        }
    }
}

/// Result of a graph export operation.
pub struct ExportResult {
    /// The rendered graph content (DOT or Mermaid text).
    pub content: String,
    /// Number of boxes drawn (files and collapsed folders; clusters excluded).
    pub node_count: usize,
    /// Number of drawn edges after merging edges between the same visible pair.
    pub edge_count: usize,
    /// Advisory warnings (e.g. scale guard messages).
    pub warnings: Vec<String>,
}
