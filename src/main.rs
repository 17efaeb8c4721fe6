use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use code_graph_layout::cli::{Cli, Commands, GraphArgs};
use code_graph_layout::config::LayoutConfig;
use code_graph_layout::export::export_projection;
use code_graph_layout::output::{format_layout, format_stats};
use code_graph_layout::stats::layout_stats;
use code_graph_layout::{CollapseState, LayoutSession, Projection};

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "CODE_GRAPH_LOG";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { graph, format } => {
            let view = load_view(&graph)?;
            format_layout(&view.projection, &view.state, &format);
        }

        Commands::Export {
            graph,
            format,
            stdout,
            output,
        } => {
            let view = load_view(&graph)?;
            let result = export_projection(&view.projection, &view.state, format);

            if stdout {
                print!("{}", result.content);
            } else {
                let path = output.unwrap_or_else(|| {
                    graph_dir(&graph.graph).join(format!("code-graph-layout.{}", format.extension()))
                });
                std::fs::write(&path, &result.content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!(
                    "Exported {} nodes, {} edges to {}",
                    result.node_count,
                    result.edge_count,
                    path.display()
                );
            }
        }

        Commands::Stats { graph, format } => {
            let view = load_view(&graph)?;
            let tree = view
                .session
                .tree()
                .context("graph was loaded but no tree is cached")?;
            let stats = layout_stats(tree, view.session.edges().len(), &view.projection);
            format_stats(&stats, &format);
        }
    }

    Ok(())
}

/// A loaded session with the collapse state requested on the command line applied.
struct View {
    session: LayoutSession,
    state: CollapseState,
    projection: Projection,
}

fn load_view(args: &GraphArgs) -> Result<View> {
    let text = read_graph(&args.graph)?;

    let config = match &args.config {
        Some(path) => LayoutConfig::load_file(path),
        None => LayoutConfig::load(&graph_dir(&args.graph)),
    };

    let mut session = LayoutSession::with_config(&config);
    let mut state = session
        .load_json(&text)
        .with_context(|| format!("failed to load graph from {}", args.graph.display()))?;

    if args.expand_all {
        let folders: Vec<String> = state.iter().map(|(id, _)| id.to_owned()).collect();
        for id in folders {
            state.set(id, true);
        }
    }
    for id in &args.expand {
        session
            .set_collapsed(&mut state, id, true)
            .with_context(|| format!("cannot expand `{id}`"))?;
    }
    for id in &args.collapse {
        session
            .set_collapsed(&mut state, id, false)
            .with_context(|| format!("cannot collapse `{id}`"))?;
    }

    let projection = session.recompute(&state);
    Ok(View {
        session,
        state,
        projection,
    })
}

fn read_graph(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read graph from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Directory used for the config lookup and default export path.
fn graph_dir(graph: &Path) -> PathBuf {
    if graph.as_os_str() == "-" {
        return PathBuf::from(".");
    }
    match graph.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
