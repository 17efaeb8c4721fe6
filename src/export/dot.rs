use std::fmt::Write;

use crate::export::{ExportView, edge_label};
use crate::graph::node::NodeKind;
use crate::projection::model::EDGE_COLOR;

/// Escape a label for use inside a double-quoted DOT string.
pub fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the projected view as DOT.
///
/// Expanded folders become `subgraph cluster_N` blocks nested like the tree;
/// files and collapsed folders become filled boxes. Node ids are `nN`, where
/// N is the node's position in the projection, so arbitrary path characters
/// never reach DOT identifiers.
pub fn render_dot(view: &ExportView<'_>) -> String {
    let mut out = String::new();
    writeln!(out, "digraph code_graph {{").unwrap();
    writeln!(out, "    rankdir=TB;").unwrap();
    writeln!(out, "    compound=true;").unwrap();
    writeln!(out, "    node [shape=box style=filled fontname=monospace];").unwrap();

    for &pos in view.top_level() {
        render_dot_node(view, pos, 1, &mut out);
    }

    for (&(src, tgt), &count) in &view.edges {
        let mut attrs = format!("color=\"{}\" penwidth=2", EDGE_COLOR);
        if count > 1 {
            write!(attrs, " label=\"{}\"", edge_label(count)).unwrap();
        }
        writeln!(out, "    n{} -> n{} [{}];", src, tgt, attrs).unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

fn render_dot_node(view: &ExportView<'_>, pos: usize, depth: usize, out: &mut String) {
    let node = &view.nodes[pos];
    let indent = "    ".repeat(depth);
    let label = escape_dot_label(&node.label);

    if view.is_cluster(node) {
        writeln!(out, "{}subgraph cluster_{} {{", indent, pos).unwrap();
        writeln!(out, "{}    label=\"{}\";", indent, label).unwrap();
        writeln!(out, "{}    style=filled;", indent).unwrap();
        writeln!(out, "{}    fillcolor=\"{}\";", indent, node.color).unwrap();
        for &child in view.children_of(&node.id) {
            render_dot_node(view, child, depth + 1, out);
        }
        writeln!(out, "{}}}", indent).unwrap();
        return;
    }

    let shape = match node.kind {
        NodeKind::Container => " shape=folder",
        NodeKind::Leaf => "",
    };
    let deps = if node.dependency_count > 0 {
        format!("\\n{} deps", node.dependency_count)
    } else {
        String::new()
    };
    writeln!(
        out,
        "{}n{} [label=\"{}{}\" fillcolor=\"{}\"{}];",
        indent, pos, label, deps, node.color, shape
    )
    .unwrap();
}
