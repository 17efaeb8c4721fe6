use std::fmt::Write;

use crate::export::{ExportView, edge_label};
use crate::graph::node::NodeKind;

/// Escape a string for safe use in Mermaid node labels (quotes inside labels break the syntax).
fn escape_mermaid_label(s: &str) -> String {
    s.replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// Render the projected view as a Mermaid flowchart.
///
/// Expanded folders become nested `subgraph` blocks, collapsed folders use the
/// subroutine shape, files are plain rectangles. Fill colours are applied with
/// `style` lines after the edges.
pub fn render_mermaid(view: &ExportView<'_>) -> String {
    let mut out = String::new();
    writeln!(out, "flowchart TB").unwrap();

    let mut styled: Vec<usize> = Vec::new();
    for &pos in view.top_level() {
        render_mermaid_node(view, pos, 1, &mut styled, &mut out);
    }

    for (&(src, tgt), &count) in &view.edges {
        if count == 1 {
            writeln!(out, "    n{} --> n{}", src, tgt).unwrap();
        } else {
            writeln!(out, "    n{} -->|\"{}\"| n{}", src, edge_label(count), tgt).unwrap();
        }
    }

    for pos in styled {
        writeln!(out, "    style n{} fill:{}", pos, view.nodes[pos].color).unwrap();
    }

    out
}

fn render_mermaid_node(
    view: &ExportView<'_>,
    pos: usize,
    depth: usize,
    styled: &mut Vec<usize>,
    out: &mut String,
) {
    let node = &view.nodes[pos];
    let indent = "    ".repeat(depth);
    let label = escape_mermaid_label(&node.label);
    styled.push(pos);

    if view.is_cluster(node) {
        writeln!(out, "{}subgraph n{}[\"{}\"]", indent, pos, label).unwrap();
        for &child in view.children_of(&node.id) {
            render_mermaid_node(view, child, depth + 1, styled, out);
        }
        writeln!(out, "{}end", indent).unwrap();
        return;
    }

    match node.kind {
        NodeKind::Container => writeln!(out, "{}n{}[[\"{}\"]]", indent, pos, label).unwrap(),
        NodeKind::Leaf => writeln!(out, "{}n{}[\"{}\"]", indent, pos, label).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{GraphInput, SourceEdge, SourceNode};
    use crate::session::LayoutSession;

    #[test]
    fn test_mermaid_nested_subgraphs_and_edges() {
        let mut session = LayoutSession::new();
        let mut state = session
            .load(GraphInput::new(
                vec![
                    SourceNode::new("web/<App>.tsx", "<App>.tsx"),
                    SourceNode::new("api/server.go", "server.go"),
                ],
                vec![SourceEdge::new("web/<App>.tsx", "api/server.go")],
            ))
            .unwrap();
        state.set("web", true);
        let projection = session.recompute(&state);
        let text = render_mermaid(&ExportView::new(&projection, &state));

        assert!(text.starts_with("flowchart TB\n"));
        assert!(text.contains("subgraph n2[\"web\"]"), "{text}");
        assert!(text.contains("n1[[\"api\"]]"), "collapsed api uses subroutine shape:\n{text}");
        assert!(text.contains("&lt;App&gt;.tsx"), "angle brackets escaped:\n{text}");
        assert!(text.contains("n3 --> n1"), "{text}");
        assert!(text.contains("style n1 fill:#"), "{text}");
        assert_eq!(text.matches("end\n").count(), 1);
    }

    #[test]
    fn test_escape_mermaid_label() {
        assert_eq!(escape_mermaid_label("a\"{b}"), "a&quot;&#123;b&#125;");
    }
}
