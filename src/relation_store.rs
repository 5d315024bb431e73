//! # Relation Store
//!
//! Indexes raw edges by their semantic label: `label → [Edge]`.
//!
//! A raw graph need not define every edge kind. Asking for a relation the
//! graph never mentions yields an empty slice, never an error.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::model::{Edge, EdgeData, Relation};
use crate::{Error, Result};

/// Raw edges grouped by relation, input order preserved within each group.
///
/// Each group is held twice: normalized for the algebra, and as the wire
/// records for relations that are emitted unchanged.
#[derive(Debug, Clone, Default)]
pub struct RelationStore {
    relations: HashMap<Relation, Vec<Edge>>,
    records: HashMap<Relation, Vec<EdgeData>>,
    /// Labels in first-seen order.
    order: Vec<Relation>,
    skipped: usize,
}

impl RelationStore {
    /// Group `edges` by effective label.
    ///
    /// An edge with neither `label` nor `labels` fails the whole call in
    /// strict mode and is skipped with a warning otherwise.
    pub fn index<'a, I>(edges: I, config: &PipelineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = &'a EdgeData>,
    {
        let mut store = Self::default();
        for (pos, data) in edges.into_iter().enumerate() {
            match Edge::from_data(data) {
                Some(edge) => store.insert(edge, data.clone()),
                None if config.strict => {
                    return Err(Error::MalformedInput(format!(
                        "edge #{pos} ({} -> {}) has neither label nor labels",
                        data.source, data.target
                    )));
                }
                None => {
                    warn!(pos, source = %data.source, target = %data.target, "skipping edge without label");
                    store.skipped += 1;
                }
            }
        }
        debug!(relations = store.order.len(), skipped = store.skipped, "indexed relations");
        Ok(store)
    }

    /// Add an edge built in code; its record is derived from it.
    pub fn push(&mut self, edge: Edge) {
        let data = edge.clone().into_data();
        self.insert(edge, data);
    }

    fn insert(&mut self, edge: Edge, data: EdgeData) {
        if !self.relations.contains_key(&edge.relation) {
            self.order.push(edge.relation.clone());
        }
        self.records.entry(edge.relation.clone()).or_default().push(data);
        self.relations.entry(edge.relation.clone()).or_default().push(edge);
    }

    /// Edges carrying `rel`; empty when the graph has none.
    pub fn get(&self, rel: &Relation) -> &[Edge] {
        match self.relations.get(rel) {
            Some(edges) => edges,
            None => {
                debug!(relation = %rel, "relation absent, treating as empty");
                &[]
            }
        }
    }

    /// Wire records carrying `rel`, exactly as read; empty when absent.
    pub fn records(&self, rel: &Relation) -> &[EdgeData] {
        self.records.get(rel).map(Vec::as_slice).unwrap_or_default()
    }

    /// Wire records carrying `rel`, or `None` when the graph never mentions it.
    pub fn explicit_records(&self, rel: &Relation) -> Option<&[EdgeData]> {
        self.records.get(rel).map(Vec::as_slice)
    }

    /// Edges carrying `rel`, or `None` when the graph never mentions it.
    pub fn explicit(&self, rel: &Relation) -> Option<&[Edge]> {
        self.relations.get(rel).map(Vec::as_slice)
    }

    pub fn contains(&self, rel: &Relation) -> bool {
        self.relations.contains_key(rel)
    }

    /// Relation labels in first-seen order.
    pub fn labels(&self) -> &[Relation] {
        &self.order
    }

    /// Number of distinct relations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Malformed edges dropped during indexing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
