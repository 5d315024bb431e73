//! # Relational Algebra
//!
//! Pure functions over edge lists: `invert`, `compose`, `lift`.
//!
//! ```text
//! R1 = { s --w1--> t }      R2 = { t --w2--> u }
//! compose(R1, R2) = { s --w1*w2--> u }
//! ```
//!
//! Compositions that reach the same `(source, target)` pair through
//! different intermediates are merged into one edge whose weight is the
//! sum of the products. Output order is the order in which each pair was
//! first produced. All functions are total: empty input gives empty output.

use hashbrown::HashMap;

use crate::config::JoinMode;
use crate::model::{Edge, PropertyMap, Relation};

/// Swap endpoints and rename the relation to `inv_<label>`.
/// Weight and attributes pass through.
pub fn invert(edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .map(|e| Edge {
            id: e.id.clone(),
            source: e.target.clone(),
            target: e.source.clone(),
            relation: e.relation.inverted(),
            weight: e.weight,
            attrs: e.attrs.clone(),
        })
        .collect()
}

/// R1 ∘ R2.
///
/// Each result edge is labeled `new_label`, or `<r1 label>-<r2 label>` of
/// the pair that first produced it.
///
/// With [`JoinMode::SingleMatch`] only one R2 edge per source takes part
/// in the join (the last one in R2's order), so fan-out from an
/// intermediate node is lost. [`JoinMode::AllMatches`] is the full join.
pub fn compose<'a>(
    r1: &'a [Edge],
    r2: &'a [Edge],
    new_label: Option<&Relation>,
    join: JoinMode,
) -> Vec<Edge> {
    let mut acc = Accumulator::default();
    if r1.is_empty() || r2.is_empty() {
        return acc.edges;
    }

    match join {
        JoinMode::SingleMatch => {
            let by_source: HashMap<&str, &Edge> =
                r2.iter().map(|e| (e.source.as_str(), e)).collect();
            for first in r1 {
                if let Some(&second) = by_source.get(first.target.as_str()) {
                    acc.add(first, second, new_label);
                }
            }
        }
        JoinMode::AllMatches => {
            let mut by_source: HashMap<&str, Vec<&Edge>> = HashMap::new();
            for e in r2 {
                by_source.entry(e.source.as_str()).or_default().push(e);
            }
            for first in r1 {
                for &second in by_source.get(first.target.as_str()).into_iter().flatten() {
                    acc.add(first, second, new_label);
                }
            }
        }
    }

    acc.edges
}

/// `(R1 ∘ R2) ∘ inv(R1)`: the round trip that turns owner/member
/// relations into peer relations, e.g. class `hasScript` method plus
/// method `invokes` method gives class `calls` class.
pub fn lift(r1: &[Edge], r2: &[Edge], new_label: Option<&Relation>, join: JoinMode) -> Vec<Edge> {
    let forward = compose(r1, r2, None, join);
    let back = invert(r1);
    compose(&forward, &back, new_label, join)
}

/// Insertion-ordered merge of composed edges keyed by `(source, target)`.
#[derive(Default)]
struct Accumulator<'a> {
    edges: Vec<Edge>,
    index: HashMap<(&'a str, &'a str), usize>,
}

impl<'a> Accumulator<'a> {
    fn add(&mut self, first: &'a Edge, second: &'a Edge, new_label: Option<&Relation>) {
        let weight = first.weight * second.weight;
        let key = (first.source.as_str(), second.target.as_str());
        match self.index.get(&key) {
            Some(&pos) => self.edges[pos].weight += weight,
            None => {
                self.index.insert(key, self.edges.len());
                self.edges.push(Edge {
                    id: None,
                    source: first.source.clone(),
                    target: second.target.clone(),
                    relation: new_label
                        .cloned()
                        .unwrap_or_else(|| first.relation.chained(&second.relation)),
                    weight,
                    attrs: PropertyMap::new(),
                });
            }
        }
    }
}
