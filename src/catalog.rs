//! # Graph Catalog
//!
//! Facets a viewer builds its filter panels from, computed once from the
//! graph instead of by walking rendered elements: node labels, edge
//! interactions, feature traces, vulnerability analyses and role
//! stereotypes. Also the name-based selection behind "highlight these
//! classes".

use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{Graph, Value};

/// Node property listing the feature traces a node takes part in.
pub const TRACES: &str = "traces";
/// Node property listing vulnerability findings.
pub const VULNERABILITIES: &str = "vulnerabilities";
/// Key inside each vulnerability finding naming the analysis.
pub const ANALYSIS_NAME: &str = "analysis_name";
/// Node property holding the role stereotype.
pub const ROLE_STEREOTYPE: &str = "roleStereotype";

// ============================================================================
// Role stereotypes
// ============================================================================

/// Responsibility-based role of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleStereotype {
    Controller,
    Coordinator,
    InformationHolder,
    UserInterfacer,
    InternalInterfacer,
    ExternalInterfacer,
    ServiceProvider,
    Structurer,
    /// Written `*` by the classifier.
    Unreliable,
    /// Written `-` by the classifier.
    Undetermined,
}

impl RoleStereotype {
    pub const ALL: [RoleStereotype; 10] = [
        RoleStereotype::Controller,
        RoleStereotype::Coordinator,
        RoleStereotype::InformationHolder,
        RoleStereotype::UserInterfacer,
        RoleStereotype::InternalInterfacer,
        RoleStereotype::ExternalInterfacer,
        RoleStereotype::ServiceProvider,
        RoleStereotype::Structurer,
        RoleStereotype::Unreliable,
        RoleStereotype::Undetermined,
    ];

    /// Parse the value of a node's `roleStereotype` property.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rs| rs.key() == s)
    }

    /// The text the classifier writes.
    pub fn key(self) -> &'static str {
        match self {
            RoleStereotype::Controller => "Controller",
            RoleStereotype::Coordinator => "Coordinator",
            RoleStereotype::InformationHolder => "Information Holder",
            RoleStereotype::UserInterfacer => "User Interfacer",
            RoleStereotype::InternalInterfacer => "Internal Interfacer",
            RoleStereotype::ExternalInterfacer => "External Interfacer",
            RoleStereotype::ServiceProvider => "Service Provider",
            RoleStereotype::Structurer => "Structurer",
            RoleStereotype::Unreliable => "*",
            RoleStereotype::Undetermined => "-",
        }
    }

    /// Short badge symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            RoleStereotype::Controller => "CT",
            RoleStereotype::Coordinator => "CO",
            RoleStereotype::InformationHolder => "IH",
            RoleStereotype::UserInterfacer => "ITu",
            RoleStereotype::InternalInterfacer => "ITi",
            RoleStereotype::ExternalInterfacer => "ITe",
            RoleStereotype::ServiceProvider => "SP",
            RoleStereotype::Structurer => "ST",
            RoleStereotype::Unreliable => "UR",
            RoleStereotype::Undetermined => "UD",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RoleStereotype::Unreliable => "Unreliable",
            RoleStereotype::Undetermined => "Undetermined",
            other => other.key(),
        }
    }
}

impl fmt::Display for RoleStereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Distinct facet values of a graph, each in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub node_labels: Vec<String>,
    pub interactions: Vec<String>,
    pub traces: Vec<String>,
    pub vulnerabilities: Vec<String>,
    pub role_stereotypes: Vec<RoleStereotype>,
}

impl Catalog {
    pub fn of(graph: &Graph) -> Self {
        let mut interactions = Distinct::default();
        for edge in graph.edges() {
            match &edge.interaction {
                Some(i) => interactions.add(i),
                None => interactions.add(&edge.resolve_interaction()),
            }
        }

        let mut traces = Distinct::default();
        let mut vulnerabilities = Distinct::default();
        let mut roles = Vec::new();
        for node in graph.nodes() {
            let list = |key: &str| node.get(key).and_then(Value::as_list).unwrap_or_default();
            for trace in list(TRACES).iter().filter_map(Value::as_str) {
                traces.add(trace);
            }
            for finding in list(VULNERABILITIES) {
                if let Some(name) = finding
                    .as_map()
                    .and_then(|m| m.get(ANALYSIS_NAME))
                    .and_then(Value::as_str)
                {
                    vulnerabilities.add(name);
                }
            }
            if let Some(rs) = node
                .get(ROLE_STEREOTYPE)
                .and_then(Value::as_str)
                .and_then(RoleStereotype::parse)
            {
                if !roles.contains(&rs) {
                    roles.push(rs);
                }
            }
        }

        Self {
            node_labels: graph.node_labels(),
            interactions: interactions.values,
            traces: traces.values,
            vulnerabilities: vulnerabilities.values,
            role_stereotypes: roles,
        }
    }
}

#[derive(Default)]
struct Distinct {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl Distinct {
    fn add(&mut self, value: &str) {
        if !self.seen.contains(value) {
            self.seen.insert(value.to_owned());
            self.values.push(value.to_owned());
        }
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Nodes picked by name plus the edges running between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub nodes: Vec<String>,
    /// Indices into `graph.elements.edges`.
    pub edges: Vec<usize>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Select nodes whose display `name` equals one of the terms in `query`
/// (terms separated by commas and/or whitespace), and the edges with
/// both endpoints selected. Expects a normalized graph.
pub fn select_by_names(graph: &Graph, query: &str) -> Selection {
    let terms: HashSet<&str> = query
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return Selection::default();
    }

    let nodes: Vec<String> = graph
        .nodes()
        .filter(|n| n.name.as_deref().is_some_and(|name| terms.contains(name)))
        .map(|n| n.id.clone())
        .collect();
    let edges = {
        let ids: HashSet<&str> = nodes.iter().map(String::as_str).collect();
        graph
            .edges()
            .enumerate()
            .filter(|(_, e)| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
            .map(|(i, _)| i)
            .collect()
    };

    Selection { nodes, edges }
}
