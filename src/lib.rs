//! Hierarchical layout and visibility projection for source-code dependency graphs.
//!
//! A flat list of files (slash-delimited ids) and dependency edges is turned
//! into a folder tree ([`graph::FolderTree`]). Each collapse/expand of a folder
//! re-runs [`layout::layout`] and [`projection::project`] through a
//! [`session::LayoutSession`], producing positioned boxes and edges routed to
//! whatever is still visible.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod input;
pub mod layout;
pub mod output;
pub mod projection;
pub mod session;
pub mod stats;

pub use error::GraphError;
pub use input::{GraphInput, SourceEdge, SourceNode};
pub use layout::state::CollapseState;
pub use projection::model::{PositionedNode, Projection, RoutedEdge};
pub use session::LayoutSession;
