//! Label/display normalizer.
//!
//! Fills the display fields the rendering collaborator reads: `name` and
//! `label` on nodes, `interaction` and `group` on edges. Runs in place on
//! a freshly built graph and is idempotent.

use crate::model::{Graph, first_nonempty_str};

/// Property keys tried, in order, for a node's display name.
pub const NAME_KEYS: [&str; 3] = ["name", "shortname", "simpleName"];

pub fn normalize(graph: &mut Graph) {
    for node in &mut graph.elements.nodes {
        let node = &mut node.data;
        // No display name is a valid state; the renderer copes.
        node.name = first_nonempty_str(&node.properties, &NAME_KEYS).map(str::to_owned);
        node.label = node.name.clone();
    }

    for edge in &mut graph.elements.edges {
        let edge = &mut edge.data;
        let interaction = edge.resolve_interaction();
        edge.group = Some(interaction.clone());
        edge.interaction = Some(interaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeData, NodeData};

    #[test]
    fn test_name_precedence() {
        let mut g = Graph::new()
            .with_node(NodeData::new("a").with_property("shortname", "A").with_property("simpleName", "a"))
            .with_node(NodeData::new("b").with_property("name", "").with_property("simpleName", "Bee"))
            .with_node(NodeData::new("c").with_property("kind", "class"));
        normalize(&mut g);

        let names: Vec<Option<&str>> = g.nodes().map(|n| n.name.as_deref()).collect();
        assert_eq!(names, vec![Some("A"), Some("Bee"), None]);
        assert!(g.nodes().all(|n| n.label == n.name));
    }

    #[test]
    fn test_interaction_and_group() {
        let mut g = Graph::new()
            .with_edge(EdgeData::new("a", "b").with_label("calls"))
            .with_edge(EdgeData::new("a", "b").with_labels(["contains", "nests"]))
            .with_edge(EdgeData::new("a", "b"));
        normalize(&mut g);

        let tags: Vec<(&str, &str)> = g
            .edges()
            .map(|e| (e.interaction.as_deref().unwrap(), e.group.as_deref().unwrap()))
            .collect();
        assert_eq!(
            tags,
            vec![("calls", "calls"), ("contains,nests", "contains,nests"), ("nolabel", "nolabel")]
        );
    }

    #[test]
    fn test_idempotent() {
        let mut g = Graph::new()
            .with_node(NodeData::new("a").with_property("name", "Alpha"))
            .with_edge(EdgeData::new("a", "a").with_label("nests"));
        normalize(&mut g);
        let once = g.clone();
        normalize(&mut g);
        assert_eq!(g, once);
    }
}
