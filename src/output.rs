use std::io::IsTerminal;

use crate::cli::OutputFormat;
use crate::graph::node::NodeKind;
use crate::layout::state::CollapseState;
use crate::projection::model::Projection;
use crate::stats::LayoutStats;

fn kind_str(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Container => "folder",
        NodeKind::Leaf => "file",
    }
}

/// Format and print a projection to stdout according to the selected output format.
pub fn format_layout(projection: &Projection, state: &CollapseState, format: &OutputFormat) {
    match format {
        OutputFormat::Compact => {
            for n in &projection.nodes {
                println!(
                    "node {} {} {},{} {}x{}{}",
                    n.id,
                    kind_str(n.kind),
                    n.x,
                    n.y,
                    n.width,
                    n.height,
                    if n.has_external_edges { " ext" } else { "" }
                );
            }
            for e in &projection.edges {
                if e.is_suppressed {
                    println!("hidden {} ({} -> {})", e.source_visible, e.source, e.target);
                } else {
                    println!(
                        "edge {} -> {} ({} -> {})",
                        e.source_visible, e.target_visible, e.source, e.target
                    );
                }
            }
            for err in &projection.skipped {
                println!("skipped {}", err);
            }
            println!(
                "{} nodes, {} edges ({} suppressed)",
                projection.nodes.len(),
                projection.edges.len(),
                projection.suppressed_count()
            );
        }

        OutputFormat::Table => {
            let use_color = std::io::stdout().is_terminal();

            let id_w = projection
                .nodes
                .iter()
                .map(|n| n.id.len())
                .max()
                .unwrap_or(2)
                .max(2);

            print_header(
                &format!(
                    "{:<id_w$}  {:<6}  {:>6}  {:>6}  {:>6}  {:>6}  {}",
                    "ID",
                    "KIND",
                    "X",
                    "Y",
                    "WIDTH",
                    "HEIGHT",
                    "EXTERNAL",
                    id_w = id_w,
                ),
                use_color,
            );
            println!("{}", "-".repeat(id_w + 50));
            for n in &projection.nodes {
                println!(
                    "{:<id_w$}  {:<6}  {:>6}  {:>6}  {:>6}  {:>6}  {}",
                    n.id,
                    kind_str(n.kind),
                    n.x,
                    n.y,
                    n.width,
                    n.height,
                    if n.has_external_edges { "yes" } else { "" },
                    id_w = id_w,
                );
            }

            println!();
            let src_w = projection
                .edges
                .iter()
                .map(|e| e.source_visible.len())
                .max()
                .unwrap_or(6)
                .max(6);
            let tgt_w = projection
                .edges
                .iter()
                .map(|e| e.target_visible.len())
                .max()
                .unwrap_or(6)
                .max(6);
            print_header(
                &format!(
                    "{:<src_w$}  {:<tgt_w$}  {}",
                    "SOURCE",
                    "TARGET",
                    "STATUS",
                    src_w = src_w,
                    tgt_w = tgt_w,
                ),
                use_color,
            );
            println!("{}", "-".repeat(src_w + tgt_w + 12));
            for e in &projection.edges {
                println!(
                    "{:<src_w$}  {:<tgt_w$}  {}",
                    e.source_visible,
                    e.target_visible,
                    if e.is_suppressed { "suppressed" } else { "drawn" },
                    src_w = src_w,
                    tgt_w = tgt_w,
                );
            }
        }

        OutputFormat::Json => {
            let output = serde_json::json!({
                "nodes": projection.nodes,
                "edges": projection.edges,
                "skipped": projection.skipped.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "collapse_state": state,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_default()
            );
        }
    }
}

/// Format and print layout stats to stdout according to the selected output format.
pub fn format_stats(stats: &LayoutStats, format: &OutputFormat) {
    match format {
        OutputFormat::Compact => {
            println!(
                "files {} folders {} depth {}",
                stats.file_count, stats.folder_count, stats.max_depth
            );
            println!(
                "edges {} drawn {} suppressed {} dangling {}",
                stats.edge_count, stats.active_edges, stats.suppressed_edges, stats.dangling_edges
            );
            println!(
                "visible {} canvas {}x{}",
                stats.visible_nodes, stats.canvas_width, stats.canvas_height
            );
        }

        OutputFormat::Table => {
            let use_color = std::io::stdout().is_terminal();
            print_header(&format!("{:<18}  {:>8}", "METRIC", "VALUE"), use_color);
            println!("{}", "-".repeat(28));
            let rows: [(&str, String); 10] = [
                ("files", stats.file_count.to_string()),
                ("folders", stats.folder_count.to_string()),
                ("max depth", stats.max_depth.to_string()),
                ("edges", stats.edge_count.to_string()),
                ("drawn edges", stats.active_edges.to_string()),
                ("suppressed edges", stats.suppressed_edges.to_string()),
                ("dangling edges", stats.dangling_edges.to_string()),
                ("visible nodes", stats.visible_nodes.to_string()),
                ("canvas width", stats.canvas_width.to_string()),
                ("canvas height", stats.canvas_height.to_string()),
            ];
            for (name, value) in rows {
                println!("{:<18}  {:>8}", name, value);
            }
        }

        OutputFormat::Json => match serde_json::to_string_pretty(stats) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serialising stats: {}", e),
        },
    }
}

fn print_header(line: &str, use_color: bool) {
    if use_color {
        println!("\x1b[1m{}\x1b[0m", line);
    } else {
        println!("{}", line);
    }
}
