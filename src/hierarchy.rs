//! # Hierarchy Reducer
//!
//! Raw graphs encode two kinds of ownership in one flat `contains`
//! relation: a package or file owning a class, and a class owning a
//! nested class. Rendering treats these as different parent relations,
//! so the reducer splits them:
//!
//! | Relation   | Parent                       | Child             |
//! |------------|------------------------------|-------------------|
//! | `contains` | container (or nested class)  | direct member     |
//! | `nests`    | top-level class              | nested class      |
//!
//! The module also resolves a parent map from any relation, the data side
//! of "show relation X as compound nesting".

use hashbrown::{HashMap, HashSet};

use crate::model::{EdgeData, NodeData, Relation, kind};

/// Result of splitting the raw `contains` relation.
///
/// Edges are wire records: `contains` edges pass through untouched and a
/// derived `nests` edge differs from its `contains` record only in `label`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    /// Structure nodes that no Structure contains, in node order.
    pub top_level: Vec<String>,
    /// Targets of `contains` edges whose source is a Structure.
    pub nested: HashSet<String>,
    /// `contains` without the edges leaving a top-level class.
    pub contains: Vec<EdgeData>,
    /// Class → nested class.
    pub nests: Vec<EdgeData>,
}

impl Hierarchy {
    pub fn is_top_level(&self, id: &str) -> bool {
        self.top_level.iter().any(|t| t == id)
    }
}

/// Split `contains` into `contains` and `nests`.
///
/// `nodes` must be in graph order with unique ids. When the raw graph
/// already has a `nests` relation it is used verbatim; `contains` is
/// filtered either way.
pub fn reduce(
    nodes: &[&NodeData],
    contains: &[EdgeData],
    explicit_nests: Option<&[EdgeData]>,
) -> Hierarchy {
    let structures: HashSet<&str> = nodes
        .iter()
        .filter(|n| n.has_label(kind::STRUCTURE))
        .map(|n| n.id.as_str())
        .collect();

    let nested: HashSet<String> = contains
        .iter()
        .filter(|e| structures.contains(e.source.as_str()))
        .map(|e| e.target.clone())
        .collect();

    let top_level: Vec<String> = nodes
        .iter()
        .filter(|n| n.has_label(kind::STRUCTURE) && !nested.contains(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect();

    let (from_top, kept): (Vec<&EdgeData>, Vec<&EdgeData>) = {
        let top_set: HashSet<&str> = top_level.iter().map(String::as_str).collect();
        contains.iter().partition(|e| top_set.contains(e.source.as_str()))
    };

    let nests = match explicit_nests {
        Some(nests) => nests.to_vec(),
        None => from_top
            .into_iter()
            .map(|e| EdgeData { label: Some(Relation::Nests.into()), ..e.clone() })
            .collect(),
    };

    Hierarchy {
        top_level,
        nested,
        contains: kept.into_iter().cloned().collect(),
        nests,
    }
}

// ============================================================================
// Parent resolution
// ============================================================================

/// Child → parent along edges whose interaction is `relation`.
///
/// The target is the child unless `inverted`. When a child appears in
/// several edges the last one wins. Edges without a resolved
/// `interaction` fall back to their effective label.
pub fn parent_map<'a, I>(edges: I, relation: &str, inverted: bool) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a EdgeData>,
{
    let mut parents = HashMap::new();
    for edge in edges {
        let interaction = match &edge.interaction {
            Some(i) => i.clone(),
            None => edge.resolve_interaction(),
        };
        if interaction != relation {
            continue;
        }
        let (child, parent) = if inverted {
            (&edge.source, &edge.target)
        } else {
            (&edge.target, &edge.source)
        };
        parents.insert(child.clone(), parent.clone());
    }
    parents
}

/// Number of ancestors of `id`. Stops at the first repeated node, so a
/// cyclic parent map terminates.
pub fn depth(parents: &HashMap<String, String>, id: &str) -> usize {
    let mut seen = HashSet::new();
    seen.insert(id);
    let mut current = id;
    let mut depth = 0;
    while let Some(parent) = parents.get(current) {
        if !seen.insert(parent.as_str()) {
            break;
        }
        depth += 1;
        current = parent.as_str();
    }
    depth
}
