//! Relation: the semantic label of an edge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic relation name.
///
/// Every relation the raw exporter emits or the pipeline derives has its
/// own variant. Composite (`hasScript-invokes`), inverted (`inv_hasScript`)
/// and unknown labels land in `Other`. Always build from text through
/// [`Relation::parse`] (or `From<&str>`) so a known name never ends up
/// wrapped in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    // Raw relations
    Contains,
    Nests,
    Specializes,
    HasScript,
    Invokes,
    Instantiates,
    HasVariable,
    Type,
    HasParameter,
    ReturnType,

    // Derived relations
    Calls,
    Constructs,
    Holds,
    Accepts,
    Returns,

    Other(String),
}

impl Relation {
    pub fn parse(s: &str) -> Self {
        match s {
            "contains" => Relation::Contains,
            "nests" => Relation::Nests,
            "specializes" => Relation::Specializes,
            "hasScript" => Relation::HasScript,
            "invokes" => Relation::Invokes,
            "instantiates" => Relation::Instantiates,
            "hasVariable" => Relation::HasVariable,
            "type" => Relation::Type,
            "hasParameter" => Relation::HasParameter,
            "returnType" => Relation::ReturnType,
            "calls" => Relation::Calls,
            "constructs" => Relation::Constructs,
            "holds" => Relation::Holds,
            "accepts" => Relation::Accepts,
            "returns" => Relation::Returns,
            other => Relation::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Relation::Contains => "contains",
            Relation::Nests => "nests",
            Relation::Specializes => "specializes",
            Relation::HasScript => "hasScript",
            Relation::Invokes => "invokes",
            Relation::Instantiates => "instantiates",
            Relation::HasVariable => "hasVariable",
            Relation::Type => "type",
            Relation::HasParameter => "hasParameter",
            Relation::ReturnType => "returnType",
            Relation::Calls => "calls",
            Relation::Constructs => "constructs",
            Relation::Holds => "holds",
            Relation::Accepts => "accepts",
            Relation::Returns => "returns",
            Relation::Other(s) => s,
        }
    }

    /// `inv_<label>`. Not an involution on the text: inverting twice
    /// yields `inv_inv_<label>`.
    pub fn inverted(&self) -> Self {
        Relation::Other(format!("inv_{}", self.as_str()))
    }

    /// `<self>-<next>`, the label of an unnamed composition.
    pub fn chained(&self, next: &Relation) -> Self {
        Relation::Other(format!("{}-{}", self.as_str(), next.as_str()))
    }
}

impl From<&str> for Relation {
    fn from(s: &str) -> Self { Relation::parse(s) }
}

impl From<String> for Relation {
    fn from(s: String) -> Self { Relation::parse(&s) }
}

impl From<Relation> for String {
    fn from(r: Relation) -> Self {
        match r {
            Relation::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
