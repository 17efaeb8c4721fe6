use super::FolderTree;

/// Pastel fills used when no palette is configured.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#F28B82", "#FBBC05", "#FFF475", "#CCFF90", "#A7FFEB", "#CBF0F8", "#AECBFA", "#D7AEFB",
    "#FDCFE8", "#E6C9A8", "#E8EAED",
];

/// Colour used when the palette is empty.
const FALLBACK_COLOR: &str = "#E8EAED";

/// Pick a palette entry for a node id. Same id, same palette -> same colour.
pub fn color_for(id: &str, palette: &[String]) -> String {
    if palette.is_empty() {
        return FALLBACK_COLOR.to_owned();
    }
    let slot = (fnv1a(id.as_bytes()) % palette.len() as u64) as usize;
    palette[slot].clone()
}

/// Give every node without a colour one derived from its id.
///
/// Nodes that already carry a colour keep it, so calling this again on a
/// cached tree never changes what is on screen.
pub fn assign_colors(tree: &mut FolderTree, palette: &[String]) {
    let indices: Vec<_> = tree.graph.node_indices().collect();
    for idx in indices {
        let node = &mut tree.graph[idx];
        if node.color.is_empty() {
            node.color = color_for(&node.id, palette);
        }
    }
}

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect()
}

// 64-bit FNV-1a; stable across platforms and toolchains, unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SourceNode;

    #[test]
    fn test_color_is_deterministic() {
        let palette = default_palette();
        assert_eq!(color_for("src/main.rs", &palette), color_for("src/main.rs", &palette));
        assert!(palette.contains(&color_for("src/main.rs", &palette)));
    }

    #[test]
    fn test_fnv_known_vectors() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        assert_eq!(color_for("x", &[]), FALLBACK_COLOR);
    }

    #[test]
    fn test_assign_colors_covers_every_node_and_is_stable() {
        let nodes = vec![SourceNode::new("a/x.py", "x.py"), SourceNode::new("b/y.py", "y.py")];
        let mut tree = FolderTree::build(&nodes).unwrap();
        let palette = default_palette();
        assign_colors(&mut tree, &palette);

        let before: Vec<String> = tree
            .graph
            .node_indices()
            .map(|i| tree.graph[i].color.clone())
            .collect();
        assert!(before.iter().all(|c| !c.is_empty()), "every node gets a colour");

        // A different palette must not repaint an already-coloured tree.
        assign_colors(&mut tree, &["#000000".to_owned()]);
        let after: Vec<String> = tree
            .graph
            .node_indices()
            .map(|i| tree.graph[i].color.clone())
            .collect();
        assert_eq!(before, after);
    }
}
