use serde::{Serialize, Serializer};

use crate::error::GraphError;
use crate::graph::node::NodeKind;

/// Stroke colour of every drawn dependency edge.
pub const EDGE_COLOR: &str = "#A9A9A9";
const EDGE_STROKE_WIDTH: u32 = 2;
const ARROW_SIZE: u32 = 15;

/// A node that is on screen under the current collapse state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub kind: NodeKind,
    /// Offset from the parent folder's top-left corner.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub label: String,
    pub dependency_count: u32,
    /// At least one drawn edge starts or ends here.
    pub has_external_edges: bool,
    /// `None` only for the root.
    pub parent_id: Option<String>,
}

/// Closed arrow head drawn at the target end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrowHead {
    pub width: u32,
    pub height: u32,
    pub color: &'static str,
}

/// Rendering hints for an edge. Derived only from whether it is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    pub hidden: bool,
    pub stroke: &'static str,
    pub stroke_width: u32,
    pub arrow_head: Option<ArrowHead>,
}

impl EdgeStyle {
    pub fn for_edge(is_suppressed: bool) -> Self {
        if is_suppressed {
            Self {
                hidden: true,
                stroke: EDGE_COLOR,
                stroke_width: 0,
                arrow_head: None,
            }
        } else {
            Self {
                hidden: false,
                stroke: EDGE_COLOR,
                stroke_width: EDGE_STROKE_WIDTH,
                arrow_head: Some(ArrowHead {
                    width: ARROW_SIZE,
                    height: ARROW_SIZE,
                    color: EDGE_COLOR,
                }),
            }
        }
    }
}

/// A source edge re-attached to the nodes that are actually visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedEdge {
    /// `e-{source}-{target}-{ordinal}`; unique even for duplicate edges.
    pub id: String,
    /// Original endpoints as given in the input.
    pub source: String,
    pub target: String,
    pub source_visible: String,
    pub target_visible: String,
    /// Both ends collapse into the same visible node; the edge is not drawn.
    pub is_suppressed: bool,
    pub style: EdgeStyle,
}

/// Output of one recomputation: what a renderer needs to paint the diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Visible nodes in depth-first display order; parents precede children.
    pub nodes: Vec<PositionedNode>,
    /// One entry per routable input edge, in input order.
    pub edges: Vec<RoutedEdge>,
    /// Edges that could not be routed, one `DanglingEdgeReference` each.
    /// Serialized as the error messages.
    #[serde(serialize_with = "serialize_errors")]
    pub skipped: Vec<GraphError>,
}

fn serialize_errors<S>(errors: &[GraphError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges that are drawn.
    pub fn active_edges(&self) -> impl Iterator<Item = &RoutedEdge> {
        self.edges.iter().filter(|e| !e.is_suppressed)
    }

    pub fn suppressed_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_suppressed).count()
    }
}
