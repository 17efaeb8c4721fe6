use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::export::model::ExportFormat;

/// Lay out a source-code dependency graph as nested, collapsible folders.
///
/// Reads the `{ Nodes, Edges }` JSON emitted by a graph producer, builds the
/// folder tree, and reports where every visible box goes and how dependency
/// edges route once collapsed folders swallow their contents.
#[derive(Parser, Debug)]
#[command(
    name = "code-graph-layout",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for query results.
#[derive(Clone, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Compact one-line-per-result format (default).
    #[default]
    Compact,
    /// Human-readable columnar table with bold headers when stdout is a terminal.
    Table,
    /// Structured JSON suitable for programmatic consumption.
    Json,
}

/// Graph source and collapse overrides shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph JSON file, or `-` to read stdin.
    pub graph: PathBuf,

    /// Expand a folder (repeatable). Applied in order after the default state.
    #[arg(long, value_name = "FOLDER")]
    pub expand: Vec<String>,

    /// Collapse a folder (repeatable). Applied after all --expand flags.
    #[arg(long, value_name = "FOLDER")]
    pub collapse: Vec<String>,

    /// Expand every folder, ignoring the default open depth.
    #[arg(long)]
    pub expand_all: bool,

    /// Configuration file (default: code-graph-layout.toml next to the graph).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the layout and print positioned nodes and routed edges.
    Layout {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Render the visible diagram as Graphviz DOT or a Mermaid flowchart.
    ///
    /// Expanded folders become nested clusters; edges joining the same pair of
    /// visible boxes are merged and labelled with their count.
    Export {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Dot)]
        format: ExportFormat,

        /// Write to stdout instead of a file.
        #[arg(long)]
        stdout: bool,

        /// Output file (default: code-graph-layout.<ext> next to the graph).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Summarise the tree and the current projection.
    Stats {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },
}
