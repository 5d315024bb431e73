//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use crate::model::kind;
use crate::Result;

// ============================================================================
// Join semantics
// ============================================================================

/// How `compose` joins R1 targets against R2 sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// R2 is indexed by source and keeps one edge per source: the last one
    /// in R2's order. Matches the output of existing saved graphs.
    #[default]
    SingleMatch,
    /// Full relational join: every R2 edge leaving the intermediate node
    /// contributes.
    AllMatches,
}

// ============================================================================
// PipelineConfig
// ============================================================================

/// Knobs for the abstraction pipeline.
///
/// All fields default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub join: JoinMode,
    /// Fail on malformed edges, unlabeled nodes and duplicate node ids
    /// instead of skipping them with a warning.
    pub strict: bool,
    /// Node labels whose presence means the graph is method-level and
    /// needs abstraction.
    pub trigger_labels: Vec<String>,
    /// Node labels kept in the abstract graph.
    pub kept_labels: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            join: JoinMode::default(),
            strict: false,
            trigger_labels: [kind::OPERATION, kind::CONSTRUCTOR, kind::SCRIPT]
                .map(String::from)
                .to_vec(),
            kept_labels: [kind::CONTAINER, kind::STRUCTURE, kind::PRIMITIVE, kind::PROBLEM]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_join(mut self, join: JoinMode) -> Self {
        self.join = join;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_trigger_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.trigger_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kept_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.kept_labels = labels.into_iter().map(Into::into).collect();
        self
    }
}
