//! # Resource Loading
//!
//! The only asynchronous boundary: fetching the graph document and the
//! stylesheet the renderer needs. Both are requested concurrently and both
//! must arrive before the pipeline runs. A failure of either aborts the
//! load; nothing partial is returned and nothing is retried.
//!
//! | Loader     | Source                                        |
//! |------------|-----------------------------------------------|
//! | `FsLoader` | `<data_dir>/<name>.json` and a stylesheet file |

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::Graph;
use crate::pipeline::PreparedGraph;
use crate::{Abstractor, Error, Result};

// ============================================================================
// Loader configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding `<name>.json` graph documents.
    pub data_dir: PathBuf,
    /// Stylesheet handed to the renderer alongside the graph.
    pub stylesheet: PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            stylesheet: PathBuf::from("style.cycss"),
        }
    }
}

// ============================================================================
// ResourceLoader trait
// ============================================================================

/// Source of the two resources a load needs.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Raw JSON text of the graph called `name`.
    async fn load_graph(&self, name: &str) -> Result<String>;

    /// Stylesheet text.
    async fn load_stylesheet(&self) -> Result<String>;
}

/// Reads resources from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    config: LoaderConfig,
}

impl FsLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn graph_path(&self, name: &str) -> PathBuf {
        self.config.data_dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl ResourceLoader for FsLoader {
    async fn load_graph(&self, name: &str) -> Result<String> {
        let path = self.graph_path(name);
        tokio::fs::read_to_string(&path).await.map_err(|e| Error::ResourceLoad {
            resource: path.display().to_string(),
            message: e.to_string(),
        })
    }

    async fn load_stylesheet(&self) -> Result<String> {
        let path = &self.config.stylesheet;
        tokio::fs::read_to_string(path).await.map_err(|e| Error::ResourceLoad {
            resource: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// load()
// ============================================================================

/// A prepared graph together with its stylesheet.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: PreparedGraph,
    pub stylesheet: String,
}

/// Fetch graph and stylesheet concurrently, then run the pipeline.
pub async fn load<L>(loader: &L, name: &str, abstractor: &Abstractor) -> Result<LoadedGraph>
where
    L: ResourceLoader + ?Sized,
{
    let (raw, stylesheet) = tokio::try_join!(loader.load_graph(name), loader.load_stylesheet())?;
    let raw = Graph::from_json_str(&raw)?;
    let graph = abstractor.prepare(&raw)?;
    info!(
        name,
        nodes = graph.abstract_graph.node_count(),
        edges = graph.abstract_graph.edge_count(),
        "graph loaded"
    );
    Ok(LoadedGraph { graph, stylesheet })
}
