use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GraphError;

/// A file reported by the graph producer. `id` is a slash-delimited path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    #[serde(rename = "Label", alias = "label", default)]
    pub label: String,
    /// Number of dependencies the producer counted for this file.
    #[serde(
        rename = "DependencyCount",
        alias = "dependencyCount",
        alias = "dependency_count",
        default
    )]
    pub dependency_count: u32,
}

/// A directed dependency between two source nodes. Duplicates and self-loops are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEdge {
    #[serde(rename = "Source", alias = "source")]
    pub source: String,
    #[serde(rename = "Target", alias = "target")]
    pub target: String,
}

impl SourceNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            dependency_count: 0,
        }
    }
}

impl SourceEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The flat graph as delivered by the producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    #[serde(rename = "Nodes")]
    pub nodes: Vec<SourceNode>,
    #[serde(rename = "Edges")]
    pub edges: Vec<SourceEdge>,
}

impl GraphInput {
    pub fn new(nodes: Vec<SourceNode>, edges: Vec<SourceEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a JSON document into a graph, rejecting anything that is not a
    /// well-formed `{ Nodes: [...], Edges: [...] }` object.
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| GraphError::InvalidGraphInput(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value. Both the producer's capitalised
    /// keys (`Nodes`, `Edges`) and lowercase keys are accepted.
    pub fn from_value(value: Value) -> Result<Self, GraphError> {
        let Value::Object(map) = value else {
            return Err(GraphError::InvalidGraphInput(format!(
                "expected a JSON object, found {}",
                value_kind(&value)
            )));
        };

        let raw_nodes = collection(&map, &["Nodes", "nodes"], "Nodes")?;
        let raw_edges = collection(&map, &["Edges", "edges"], "Edges")?;

        let nodes = raw_nodes
            .iter()
            .enumerate()
            .map(|(i, item)| {
                SourceNode::deserialize(item)
                    .map_err(|e| GraphError::InvalidGraphInput(format!("node #{i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges = raw_edges
            .iter()
            .enumerate()
            .map(|(i, item)| {
                SourceEdge::deserialize(item)
                    .map_err(|e| GraphError::InvalidGraphInput(format!("edge #{i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nodes, edges })
    }

    /// Drop every node whose id matches one of `patterns`, along with the edges
    /// touching it. Returns the number of nodes removed.
    pub fn exclude(&mut self, patterns: &[glob::Pattern]) -> usize {
        if patterns.is_empty() {
            return 0;
        }
        let before = self.nodes.len();
        let is_excluded = |id: &str| patterns.iter().any(|p| p.matches(id));

        let removed: std::collections::HashSet<String> = self
            .nodes
            .iter()
            .filter(|n| is_excluded(&n.id))
            .map(|n| n.id.clone())
            .collect();
        self.nodes.retain(|n| !removed.contains(&n.id));
        self.edges
            .retain(|e| !removed.contains(&e.source) && !removed.contains(&e.target));

        before - self.nodes.len()
    }
}

fn collection<'a>(
    map: &'a Map<String, Value>,
    keys: &[&str],
    name: &str,
) -> Result<&'a Vec<Value>, GraphError> {
    match keys.iter().find_map(|k| map.get(*k)) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(GraphError::InvalidGraphInput(format!(
            "`{name}` must be an array, found {}",
            value_kind(other)
        ))),
        None => Err(GraphError::InvalidGraphInput(format!(
            "missing `{name}` collection"
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
