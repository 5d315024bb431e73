//! Graph: the `{ elements: { nodes, edges } }` document.

use std::io::Read;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use super::{EdgeData, NodeData};
use crate::Result;

/// The `{ data: ... }` wrapper every element carries in the JSON format.
/// Sibling keys (`classes`, `group`, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element<T> {
    pub data: T,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl<T> From<T> for Element<T> {
    fn from(data: T) -> Self { Self { data, extra: serde_json::Map::new() } }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    #[serde(default)]
    pub nodes: Vec<Element<NodeData>>,
    #[serde(default)]
    pub edges: Vec<Element<EdgeData>>,
}

/// A complete graph snapshot, raw or abstract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub elements: Elements,
    /// Top-level keys besides `elements`, kept for round-tripping.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a graph document. A missing `elements` key is an error.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_node(mut self, node: NodeData) -> Self {
        self.elements.nodes.push(node.into());
        self
    }

    pub fn with_edge(mut self, edge: EdgeData) -> Self {
        self.elements.edges.push(edge.into());
        self
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.elements.nodes.iter().map(|n| &n.data)
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.elements.edges.iter().map(|e| &e.data)
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.nodes().find(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize { self.elements.nodes.len() }
    pub fn edge_count(&self) -> usize { self.elements.edges.len() }

    /// Unique node labels in first-seen order.
    pub fn node_labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        for label in self.nodes().flat_map(|n| n.labels.iter()) {
            if seen.insert(label.as_str()) {
                labels.push(label.clone());
            }
        }
        labels
    }

    /// True if any node carries one of `labels`.
    pub fn has_any_label<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        self.nodes().any(|n| n.has_any_label(labels))
    }
}
