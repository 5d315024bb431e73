//! # Graph Abstraction Pipeline
//!
//! Turns a method-level raw graph into the class-level graph that gets
//! rendered:
//!
//! ```text
//! raw Graph
//!     │
//!     ├──> RelationStore   (edges grouped by label)
//!     ├──> algebra         calls      = lift(hasScript, invokes)
//!     │                    constructs = hasScript ∘ instantiates
//!     │                    holds      = hasVariable ∘ type
//!     │                    accepts    = hasScript ∘ (hasParameter ∘ type)
//!     │                    returns    = hasScript ∘ returnType
//!     ├──> hierarchy       contains / nests split
//!     ├──> node filter     Container | Structure | Primitive | Problem
//!     └──> normalize       name/label, interaction/group
//! ```
//!
//! Graphs without method-level nodes are already coarse and pass through.
//! The input graph is never mutated; `PreparedGraph::original` is an
//! independent copy of it.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::algebra::{compose, lift};
use crate::config::PipelineConfig;
use crate::hierarchy;
use crate::model::{Edge, EdgeData, Element, Elements, Graph, NodeData, Relation};
use crate::normalize::normalize;
use crate::relation_store::RelationStore;
use crate::{Error, Result};

/// What the rendering collaborator receives: the untouched original and
/// the normalized abstract graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedGraph {
    pub original: Graph,
    #[serde(rename = "abstract")]
    pub abstract_graph: Graph,
}

/// True if any node carries one of the configured trigger labels
/// (method-level nodes).
pub fn needs_abstraction(graph: &Graph, config: &PipelineConfig) -> bool {
    graph.has_any_label(&config.trigger_labels)
}

/// Build the abstract graph. Does not normalize.
pub fn abstractize(graph: &Graph, config: &PipelineConfig) -> Result<Graph> {
    let nodes = index_nodes(graph, config)?;
    let store = RelationStore::index(graph.edges(), config)?;
    let join = config.join;

    let has_script = store.get(&Relation::HasScript);
    let calls = lift(has_script, store.get(&Relation::Invokes), Some(&Relation::Calls), join);
    let constructs = compose(
        has_script,
        store.get(&Relation::Instantiates),
        Some(&Relation::Constructs),
        join,
    );
    let holds = compose(
        store.get(&Relation::HasVariable),
        store.get(&Relation::Type),
        Some(&Relation::Holds),
        join,
    );
    let parameter_types = compose(
        store.get(&Relation::HasParameter),
        store.get(&Relation::Type),
        None,
        join,
    );
    let accepts = compose(has_script, &parameter_types, Some(&Relation::Accepts), join);
    let returns = compose(
        has_script,
        store.get(&Relation::ReturnType),
        Some(&Relation::Returns),
        join,
    );

    let hierarchy::Hierarchy { top_level, contains, nests, .. } = hierarchy::reduce(
        &nodes,
        store.records(&Relation::Contains),
        store.explicit_records(&Relation::Nests),
    );
    let specializes = store.records(&Relation::Specializes);

    debug!(
        top_level = top_level.len(),
        contains = contains.len(),
        nests = nests.len(),
        specializes = specializes.len(),
        calls = calls.len(),
        constructs = constructs.len(),
        holds = holds.len(),
        accepts = accepts.len(),
        returns = returns.len(),
        "derived relations"
    );

    let kept: Vec<Element<NodeData>> = nodes
        .into_iter()
        .filter(|n| n.has_any_label(&config.kept_labels))
        .map(|n| Element::from(n.clone()))
        .collect();

    // Fixed relation order, no dedup across relations. Raw relations keep
    // their records as read.
    let raw = contains.into_iter().chain(specializes.iter().cloned()).chain(nests);
    let derived = [calls, constructs, holds, accepts, returns]
        .into_iter()
        .flatten()
        .map(Edge::into_data);
    let edges: Vec<Element<EdgeData>> = raw.chain(derived).map(Element::from).collect();

    Ok(Graph { elements: Elements { nodes: kept, edges }, ..Graph::default() })
}

/// Abstract (when needed) and normalize. `raw` is left untouched.
pub fn prepare(raw: &Graph, config: &PipelineConfig) -> Result<PreparedGraph> {
    let original = raw.clone();
    let mut abstract_graph = if needs_abstraction(raw, config) {
        info!(nodes = raw.node_count(), edges = raw.edge_count(), "abstracting method-level graph");
        abstractize(raw, config)?
    } else {
        info!(nodes = raw.node_count(), "graph has no method-level nodes, passing through");
        raw.clone()
    };
    normalize(&mut abstract_graph);
    debug!(
        nodes = abstract_graph.node_count(),
        edges = abstract_graph.edge_count(),
        "abstract graph ready"
    );
    Ok(PreparedGraph { original, abstract_graph })
}

/// [`prepare`] with the default configuration.
pub fn prepare_graph(raw: &Graph) -> Result<PreparedGraph> {
    prepare(raw, &PipelineConfig::default())
}

/// Nodes in graph order, one per id. A repeated id replaces the earlier
/// record in place; strict mode rejects it, as it rejects unlabeled nodes.
fn index_nodes<'g>(graph: &'g Graph, config: &PipelineConfig) -> Result<Vec<&'g NodeData>> {
    let mut order: Vec<&NodeData> = Vec::with_capacity(graph.node_count());
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(graph.node_count());

    for node in graph.nodes() {
        if node.labels.is_empty() {
            if config.strict {
                return Err(Error::MalformedInput(format!("node {} has no labels", node.id)));
            }
            warn!(id = %node.id, "node has no labels");
        }
        match position.get(node.id.as_str()) {
            Some(&pos) => {
                if config.strict {
                    return Err(Error::MalformedInput(format!("duplicate node id {}", node.id)));
                }
                warn!(id = %node.id, "duplicate node id, later record wins");
                order[pos] = node;
            }
            None => {
                position.insert(node.id.as_str(), order.len());
                order.push(node);
            }
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JoinMode;
    use crate::model::kind;
    use pretty_assertions::assert_eq;

    fn n(id: &str, label: &str) -> NodeData {
        NodeData::new(id).with_labels([label])
    }

    fn rel(s: &str, t: &str, label: &str) -> EdgeData {
        EdgeData::new(s, t).with_label(label)
    }

    fn edge_triples(g: &Graph) -> Vec<(String, String, String)> {
        g.edges()
            .map(|e| (e.source.clone(), e.target.clone(), e.label.clone().unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_needs_abstraction() {
        let cfg = PipelineConfig::default();
        let coarse = Graph::new().with_node(n("A", kind::CONTAINER));
        assert!(!needs_abstraction(&coarse, &cfg));
        let fine = coarse.with_node(n("m", kind::CONSTRUCTOR));
        assert!(needs_abstraction(&fine, &cfg));
    }

    #[test]
    fn test_relation_order_and_labels() {
        let g = Graph::new()
            .with_node(n("p", kind::CONTAINER))
            .with_node(n("A", kind::STRUCTURE))
            .with_node(n("B", kind::STRUCTURE))
            .with_node(n("a1", kind::OPERATION))
            .with_node(n("b1", kind::OPERATION))
            .with_node(n("f", kind::OPERATION))
            .with_node(n("int", kind::PRIMITIVE))
            .with_edge(rel("A", "a1", "hasScript"))
            .with_edge(rel("B", "b1", "hasScript"))
            .with_edge(rel("a1", "b1", "invokes"))
            .with_edge(rel("a1", "B", "instantiates"))
            .with_edge(rel("A", "f", "hasVariable"))
            .with_edge(rel("f", "int", "type"))
            .with_edge(rel("a1", "int", "returnType"))
            .with_edge(rel("A", "B", "specializes"))
            .with_edge(rel("p", "A", "contains"))
            .with_edge(rel("p", "B", "contains"));

        let out = abstractize(&g, &PipelineConfig::default()).unwrap();
        let ids: Vec<&str> = out.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "A", "B", "int"]);

        let s = |a: &str, b: &str, c: &str| (a.to_string(), b.to_string(), c.to_string());
        assert_eq!(
            edge_triples(&out),
            vec![
                s("p", "A", "contains"),
                s("p", "B", "contains"),
                s("A", "B", "specializes"),
                s("A", "B", "calls"),
                s("A", "B", "constructs"),
                s("A", "int", "holds"),
                s("A", "int", "returns"),
            ]
        );
    }

    #[test]
    fn test_raw_relations_pass_through_unchanged() {
        let specializes = EdgeData::new("A", "B")
            .with_labels(["specializes"])
            .with_property("kind", "extends")
            .with_property("weight", "strong");
        let contains = EdgeData::new("p", "A").with_labels(["contains"]);
        let nested = EdgeData::new("A", "C").with_labels(["contains"]).with_property("line", 3);
        let g = Graph::new()
            .with_node(n("p", kind::CONTAINER))
            .with_node(n("A", kind::STRUCTURE))
            .with_node(n("B", kind::STRUCTURE))
            .with_node(n("C", kind::STRUCTURE))
            .with_node(n("m", kind::OPERATION))
            .with_edge(specializes.clone())
            .with_edge(contains.clone())
            .with_edge(nested.clone());

        let out = abstractize(&g, &PipelineConfig::default()).unwrap();
        let edges: Vec<&EdgeData> = out.edges().collect();
        assert_eq!(edges[0], &contains);
        assert_eq!(edges[1], &specializes);
        assert_eq!(edges[2], &EdgeData { label: Some("nests".into()), ..nested });
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn test_explicit_nests_pass_through_unchanged() {
        let nests = EdgeData::new("A", "C").with_labels(["nests"]);
        let g = Graph::new()
            .with_node(n("A", kind::STRUCTURE))
            .with_node(n("C", kind::STRUCTURE))
            .with_node(n("m", kind::SCRIPT))
            .with_edge(nests.clone());
        let out = abstractize(&g, &PipelineConfig::default()).unwrap();
        assert_eq!(out.edges().collect::<Vec<_>>(), vec![&nests]);
    }

    #[test]
    fn test_accepts_composes_parameter_type() {
        let g = Graph::new()
            .with_node(n("A", kind::STRUCTURE))
            .with_node(n("m", kind::OPERATION))
            .with_node(n("p", "Variable"))
            .with_node(n("T", kind::STRUCTURE))
            .with_edge(rel("A", "m", "hasScript"))
            .with_edge(rel("m", "p", "hasParameter").with_property("weight", 2))
            .with_edge(rel("p", "T", "type"));
        let out = abstractize(&g, &PipelineConfig::default()).unwrap();
        let accepts: Vec<&EdgeData> = out.edges().filter(|e| e.label.as_deref() == Some("accepts")).collect();
        assert_eq!(accepts.len(), 1);
        assert_eq!((accepts[0].source.as_str(), accepts[0].target.as_str()), ("A", "T"));
        assert_eq!(accepts[0].weight(), 2.0);
    }

    #[test]
    fn test_join_mode_is_honored() {
        let g = Graph::new()
            .with_node(n("A", kind::STRUCTURE))
            .with_node(n("v", kind::OPERATION))
            .with_node(n("X", kind::STRUCTURE))
            .with_node(n("Y", kind::STRUCTURE))
            .with_edge(rel("A", "v", "hasVariable"))
            .with_edge(rel("v", "X", "type"))
            .with_edge(rel("v", "Y", "type"));
        let single = abstractize(&g, &PipelineConfig::default()).unwrap();
        assert_eq!(single.edge_count(), 1);
        let all = abstractize(&g, &PipelineConfig::default().with_join(JoinMode::AllMatches)).unwrap();
        assert_eq!(all.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_node_ids() {
        let g = Graph::new()
            .with_node(n("A", kind::STRUCTURE))
            .with_node(n("m", kind::OPERATION))
            .with_node(NodeData::new("A").with_labels([kind::CONTAINER]).with_property("name", "late"));

        let out = abstractize(&g, &PipelineConfig::default()).unwrap();
        assert_eq!(out.node_count(), 1);
        assert_eq!(out.nodes().next().unwrap().get("name").unwrap().as_str(), Some("late"));

        let err = abstractize(&g, &PipelineConfig::default().with_strict(true)).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_unlabeled_node() {
        let g = Graph::new().with_node(NodeData::new("ghost")).with_node(n("m", kind::SCRIPT));
        let out = abstractize(&g, &PipelineConfig::default()).unwrap();
        assert_eq!(out.node_count(), 0);
        assert!(abstractize(&g, &PipelineConfig::default().with_strict(true)).is_err());
    }

    #[test]
    fn test_prepare_leaves_input_untouched() {
        let g = Graph::new()
            .with_node(n("A", kind::STRUCTURE).with_property("simpleName", "A"))
            .with_node(n("m", kind::OPERATION))
            .with_edge(rel("A", "m", "hasScript"));
        let before = g.clone();
        let prepared = prepare_graph(&g).unwrap();
        assert_eq!(g, before);
        assert_eq!(prepared.original, before);
        assert_eq!(prepared.abstract_graph.nodes().next().unwrap().name.as_deref(), Some("A"));
    }

    #[test]
    fn test_prepared_serializes_abstract_key() {
        let prepared = prepare_graph(&Graph::new()).unwrap();
        let json = serde_json::to_value(&prepared).unwrap();
        assert!(json.get("abstract").is_some());
        assert!(json.get("original").is_some());
    }
}
