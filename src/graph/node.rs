use serde::Serialize;

use crate::input::SourceNode;

/// Whether a tree node is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A folder: owns children and can be collapsed.
    Container,
    /// A file: terminal, references the source node it came from.
    Leaf,
}

/// Box computed by the layout pass. `x`/`y` are relative to the parent's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True when the two boxes share any interior area.
    pub fn overlaps(&self, other: &Geometry) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A node of the containment tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Full path prefix, or `"root"` for the synthetic root.
    pub id: String,
    pub kind: NodeKind,
    /// Last path segment (display name for folders).
    pub name: String,
    /// Present on leaves only.
    pub source: Option<SourceNode>,
    pub geometry: Geometry,
    /// Assigned once after build; empty until then.
    pub color: String,
}

impl TreeNode {
    pub fn container(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Container,
            name: name.into(),
            source: None,
            geometry: Geometry::default(),
            color: String::new(),
        }
    }

    pub fn leaf(name: impl Into<String>, source: SourceNode) -> Self {
        Self {
            id: source.id.clone(),
            kind: NodeKind::Leaf,
            name: name.into(),
            source: Some(source),
            geometry: Geometry::default(),
            color: String::new(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    /// Text shown on the node: the producer's label for files (falling back to
    /// the path segment when blank), the folder name otherwise.
    pub fn label(&self) -> &str {
        match &self.source {
            Some(src) if !src.label.is_empty() => &src.label,
            _ => &self.name,
        }
    }

    pub fn dependency_count(&self) -> u32 {
        self.source.as_ref().map_or(0, |s| s.dependency_count)
    }
}
