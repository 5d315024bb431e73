//! Node in the structure graph.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use super::{PropertyMap, Value};

/// Node category labels that carry meaning for the abstraction pipeline.
pub mod kind {
    pub const CONTAINER: &str = "Container";
    pub const STRUCTURE: &str = "Structure";
    pub const PRIMITIVE: &str = "Primitive";
    pub const PROBLEM: &str = "Problem";
    pub const OPERATION: &str = "Operation";
    pub const CONSTRUCTOR: &str = "Constructor";
    pub const SCRIPT: &str = "Script";
}

/// Label set of a node. Nodes rarely carry more than two labels.
pub type Labels = SmallVec<[String; 2]>;

/// The `data` record of a node element.
///
/// `name` and `label` are display fields filled in by the normalizer;
/// they are absent on raw input. Fields the exporter writes that have no
/// meaning here (a compound `parent`, say) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: Labels::new(),
            properties: PropertyMap::new(),
            name: None,
            label: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// True if any of the node's labels is in `labels`.
    pub fn has_any_label<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        self.labels.iter().any(|l| labels.iter().any(|k| k.as_ref() == l))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
