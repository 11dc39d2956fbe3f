//! Node records of a query graph.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifier of a node within its owning graph.
///
/// Ids are dense and assigned from 0 in insertion order. They carry no meaning
/// across different graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index of this id.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a node.
///
/// The set is open: producers may emit tags this crate does not know about,
/// which are kept verbatim in [`NodeKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Table,
    Column,
    Filter,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "TABLE",
            Self::Column => "COLUMN",
            Self::Filter => "FILTER",
            Self::Other(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "TABLE" => Self::Table,
            "COLUMN" => Self::Column,
            "FILTER" => Self::Filter,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl FromStr for NodeKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a query graph.
///
/// Equality and hashing only look at [`Node::id`]: two records with the same id
/// are the same node even when their attributes differ. Set operations within
/// one graph rely on this; never compare nodes taken from different graphs.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub value: Option<String>,
    pub selected: bool,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            value: None,
            selected: false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(id={}, type='{}', label='{}'",
            self.id, self.kind, self.label
        )?;
        if self.selected {
            write!(f, ", selected=True")?;
        }
        write!(f, ")")
    }
}
