//! Edges: the wire record (`EdgeData`) and the normalized algebra edge (`Edge`).

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Relation, Value};

/// Property key holding an edge's numeric weight.
pub const WEIGHT: &str = "weight";

/// Interaction tag of an edge with no resolvable label.
pub const NO_LABEL: &str = "nolabel";

/// The `data` record of an edge element, as exchanged in JSON.
///
/// Raw exporters use either a single `label` or a `labels` list.
/// `interaction` and `group` are display fields filled in by the normalizer.
/// Any other exporter field is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EdgeData {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            label: None,
            labels: None,
            properties: None,
            interaction: None,
            group: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(PropertyMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Effective label: `label`, else `labels` joined by `,`.
    /// Empty strings count as absent; `None` marks a malformed edge.
    pub fn relation_name(&self) -> Option<String> {
        if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
            return Some(label.to_owned());
        }
        self.labels
            .as_ref()
            .map(|ls| ls.join(","))
            .filter(|joined| !joined.is_empty())
    }

    /// Interaction tag: the effective label, or `"nolabel"`.
    pub fn resolve_interaction(&self) -> String {
        self.relation_name().unwrap_or_else(|| NO_LABEL.to_owned())
    }

    pub fn weight(&self) -> f64 {
        self.properties
            .as_ref()
            .and_then(|p| p.get(WEIGHT))
            .and_then(Value::as_float)
            .unwrap_or(1.0)
    }
}

/// A normalized edge as the relational algebra sees it.
///
/// The relation is always resolved and the weight is lifted out of the
/// property map; `attrs` holds every other property.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub relation: Relation,
    pub weight: f64,
    pub attrs: PropertyMap,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, relation: impl Into<Relation>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
            weight: 1.0,
            attrs: PropertyMap::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Normalize a wire edge. Returns `None` when no label resolves.
    pub fn from_data(data: &EdgeData) -> Option<Self> {
        let relation = Relation::parse(&data.relation_name()?);
        let mut attrs = data.properties.clone().unwrap_or_default();
        let weight = attrs
            .remove(WEIGHT)
            .and_then(|w| w.as_float())
            .unwrap_or(1.0);
        Some(Self {
            id: data.id.clone(),
            source: data.source.clone(),
            target: data.target.clone(),
            relation,
            weight,
            attrs,
        })
    }

    /// Back to the wire shape: `label` is the relation name and the weight
    /// is written into `properties`.
    pub fn into_data(self) -> EdgeData {
        let mut properties = self.attrs;
        properties.insert(WEIGHT.to_owned(), weight_value(self.weight));
        EdgeData {
            id: self.id,
            source: self.source,
            target: self.target,
            label: Some(self.relation.into()),
            labels: None,
            properties: Some(properties),
            interaction: None,
            group: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }
}

/// Integral weights are written as JSON integers.
fn weight_value(w: f64) -> Value {
    if w.fract() == 0.0 && w.abs() < i64::MAX as f64 {
        Value::Int(w as i64)
    } else {
        Value::Float(w)
    }
}
