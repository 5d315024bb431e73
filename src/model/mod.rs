//! # Structure Graph Model
//!
//! DTOs for the JSON structure-graph format and the normalized edge the
//! relational algebra works on. These types cross every boundary:
//! loader ↔ relation store ↔ algebra ↔ pipeline ↔ rendering collaborator.
//!
//! Design rule: this module is pure data. No I/O, no state, no async.

pub mod node;
pub mod edge;
pub mod relation;
pub mod graph;
pub mod value;
pub mod property_map;

pub use node::{NodeData, Labels, kind};
pub use edge::{EdgeData, Edge, WEIGHT, NO_LABEL};
pub use relation::Relation;
pub use graph::{Graph, Elements, Element};
pub use value::Value;
pub use property_map::{PropertyMap, first_nonempty_str};
