//! Graph links and their import records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{LinkPath, PathData, PathKind};

use super::node::{Node, NodeId};

/// Link identifier, derived from the endpoint ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// `"<source>-<target>"` for directed graphs. Undirected graphs order
    /// the endpoints so both directions yield the same id.
    pub fn derive(source: NodeId, target: NodeId, directed: bool) -> Self {
        let (a, b) = if directed || source <= target {
            (source, target)
        } else {
            (target, source)
        };
        LinkId(format!("{a}-{b}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LinkId {
    fn from(s: &str) -> Self {
        LinkId(s.to_string())
    }
}

/// A link between two nodes of the same graph.
///
/// Endpoints are node ids; the graph resolves them. `path` and `reversed`
/// are derived state written by routing.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: LinkId,
    source: NodeId,
    target: NodeId,
    pub shape: PathKind,
    pub title: String,
    pub data: Value,
    /// Draw path from the last routing
    pub path: PathData,
    /// Whether the text path runs target to source
    pub reversed: bool,
}

impl Link {
    /// A default line link titled with its id.
    pub fn new(id: LinkId, source: NodeId, target: NodeId) -> Self {
        Link {
            title: id.to_string(),
            id,
            source,
            target,
            shape: PathKind::default(),
            data: Value::Null,
            path: PathData::new(),
            reversed: false,
        }
    }

    pub fn with_shape(mut self, shape: PathKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn id(&self) -> &LinkId {
        &self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn is_reflexive(&self) -> bool {
        self.source == self.target
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Recompute `path` and `reversed`; returns the text path.
    pub fn route(&mut self, source: &Node, target: &Node) -> PathData {
        let shape = self.shape;
        shape.path(self, source, target)
    }
}

/// Link import/export record. `source` and `target` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Ignored on import: the id is always derived from the endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LinkId>,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<PathKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl LinkRecord {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        LinkRecord {
            id: None,
            source: source.into(),
            target: target.into(),
            shape: None,
            title: None,
            data: Value::Null,
        }
    }

    pub fn with_shape(mut self, shape: PathKind) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}
