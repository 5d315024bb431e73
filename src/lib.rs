//! # archgraph: Structure Graph Abstraction
//!
//! Static analysis of a code base yields a fine-grained property graph:
//! classes, methods, variables and types connected by `contains`,
//! `hasScript`, `invokes`, `instantiates`, `hasParameter`, ... edges.
//! This crate derives the coarse graph an engineer actually wants to look
//! at: structures and containers connected by `calls`, `constructs`,
//! `holds`, `accepts`, `returns`, `contains`, `nests` and `specializes`.
//!
//! ## Design Principles
//!
//! 1. **Pure core**: raw graph → abstract graph is a function, no ambient state
//! 2. **Clean DTOs**: `Graph`, `NodeData`, `EdgeData` mirror the JSON format exactly
//! 3. **Typed algebra**: edges are normalized once into `Edge` with a resolved `Relation`
//! 4. **Total algebra**: missing relations are empty relations, never errors
//!
//! ## Quick Start
//!
//! ```rust
//! use archgraph::{Abstractor, Graph};
//!
//! # fn example() -> archgraph::Result<()> {
//! let raw = Graph::from_json_str(r#"{"elements": {
//!     "nodes": [
//!         {"data": {"id": "A", "labels": ["Structure"], "properties": {"simpleName": "A"}}},
//!         {"data": {"id": "B", "labels": ["Structure"], "properties": {"simpleName": "B"}}},
//!         {"data": {"id": "A.run", "labels": ["Operation"], "properties": {}}},
//!         {"data": {"id": "B.go", "labels": ["Operation"], "properties": {}}}
//!     ],
//!     "edges": [
//!         {"data": {"source": "A", "target": "A.run", "label": "hasScript"}},
//!         {"data": {"source": "B", "target": "B.go", "label": "hasScript"}},
//!         {"data": {"source": "A.run", "target": "B.go", "label": "invokes"}}
//!     ]
//! }}"#)?;
//!
//! let prepared = Abstractor::default().prepare(&raw)?;
//! let calls: Vec<_> = prepared.abstract_graph.edges()
//!     .filter(|e| e.interaction.as_deref() == Some("calls"))
//!     .collect();
//! assert_eq!(calls.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `load`  | yes     | Async loading of graph + stylesheet (`tokio`) |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod relation_store;
pub mod algebra;
pub mod hierarchy;
pub mod pipeline;
pub mod normalize;
pub mod catalog;
#[cfg(feature = "load")]
pub mod load;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Graph, Elements, Element, NodeData, EdgeData, Edge,
    Relation, Value, PropertyMap,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use config::{PipelineConfig, JoinMode};
pub use relation_store::RelationStore;
pub use hierarchy::Hierarchy;
pub use pipeline::{PreparedGraph, prepare_graph};
pub use catalog::{Catalog, RoleStereotype, Selection};

#[cfg(feature = "load")]
pub use load::{ResourceLoader, FsLoader, LoaderConfig, LoadedGraph};

// ============================================================================
// Top-level Abstractor handle
// ============================================================================

/// The primary entry point. An `Abstractor` carries a pipeline
/// configuration and turns raw graphs into prepared ones.
#[derive(Debug, Clone, Default)]
pub struct Abstractor {
    config: PipelineConfig,
}

impl Abstractor {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Does `graph` contain method-level nodes?
    pub fn needs_abstraction(&self, graph: &Graph) -> bool {
        pipeline::needs_abstraction(graph, &self.config)
    }

    /// Build the (unnormalized) abstract graph.
    pub fn abstractize(&self, graph: &Graph) -> Result<Graph> {
        pipeline::abstractize(graph, &self.config)
    }

    /// Abstract when needed, normalize, and keep a copy of the original.
    pub fn prepare(&self, raw: &Graph) -> Result<PreparedGraph> {
        pipeline::prepare(raw, &self.config)
    }

    /// Parse a JSON graph document and prepare it.
    pub fn prepare_json(&self, json: &str) -> Result<PreparedGraph> {
        let raw = Graph::from_json_str(json)?;
        self.prepare(&raw)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Edge without any label form, node without labels, duplicate node id.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Unparseable JSON or a document without `elements`.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to load {resource}: {message}")]
    ResourceLoad { resource: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
