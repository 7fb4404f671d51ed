//! Export and import of graph state as plain records.
//!
//! Exported node coordinates are relative to the bounding box's minimum
//! corner. Shape and path strategies are omitted when they equal the graph's
//! configured defaults.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{GraphError, SnapshotError};

use super::link::{LinkId, LinkRecord};
use super::node::{NodeId, NodeRecord};
use super::{Graph, GraphConfig};

/// All nodes then all links, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

/// A node or link import record. Any record carrying a `source` key is a
/// link; a malformed link is an error, never a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Link(LinkRecord),
    Node(NodeRecord),
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let is_link = fields.contains_key("source");
        let value = serde_json::Value::Object(fields);
        if is_link {
            LinkRecord::deserialize(value).map(Record::Link).map_err(D::Error::custom)
        } else {
            NodeRecord::deserialize(value).map(Record::Node).map_err(D::Error::custom)
        }
    }
}

impl From<NodeRecord> for Record {
    fn from(record: NodeRecord) -> Self {
        Record::Node(record)
    }
}

impl From<LinkRecord> for Record {
    fn from(record: LinkRecord) -> Self {
        Record::Link(record)
    }
}

/// Reference to a live node or link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Node(NodeId),
    Link(LinkId),
}

impl From<NodeId> for ElementRef {
    fn from(id: NodeId) -> Self {
        ElementRef::Node(id)
    }
}

impl From<LinkId> for ElementRef {
    fn from(id: LinkId) -> Self {
        ElementRef::Link(id)
    }
}

impl Graph {
    pub fn to_snapshot(&self) -> Snapshot {
        let origin = self.bbox().min;
        let config = self.config();

        let nodes = self
            .nodes()
            .iter()
            .map(|n| NodeRecord {
                id: Some(n.id()),
                x: Some(n.x - origin.x),
                y: Some(n.y - origin.y),
                width: Some(n.width),
                height: Some(n.height),
                shape: (n.shape != config.node.shape).then_some(n.shape),
                title: Some(n.title.clone()),
                data: n.data.clone(),
            })
            .collect();

        let links = self
            .links()
            .iter()
            .map(|l| LinkRecord {
                id: Some(l.id().clone()),
                source: l.source(),
                target: l.target(),
                shape: (l.shape != config.link.shape).then_some(l.shape),
                title: Some(l.title.clone()),
                data: l.data.clone(),
            })
            .collect();

        Snapshot { nodes, links }
    }

    /// Add every node, then every link. Returns the rejected records' errors;
    /// accepted records stay added.
    pub fn import(&mut self, snapshot: Snapshot) -> Vec<GraphError> {
        let nodes = self.add_nodes(snapshot.nodes);
        let links = self.add_links(snapshot.links);
        nodes
            .into_iter()
            .filter_map(Result::err)
            .chain(links.into_iter().filter_map(Result::err))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Build a graph from snapshot JSON. Records the graph rejects are
    /// logged and skipped.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn from_json(config: GraphConfig, text: &str) -> Result<Graph, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        let mut graph = Graph::new(config);
        for err in graph.import(snapshot) {
            crate::log::warn!(error = %err, "snapshot record rejected");
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_dispatch_on_source() {
        let node: Record = serde_json::from_str(r#"{"id":1,"x":5}"#).unwrap();
        assert!(matches!(node, Record::Node(_)));
        let link: Record = serde_json::from_str(r#"{"source":1,"target":2}"#).unwrap();
        assert!(matches!(link, Record::Link(_)));
        let empty: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Record::Node(NodeRecord::default()));
    }

    #[test]
    fn link_record_without_target_is_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"source":0}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"source":"a","target":1}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn malformed_link_never_adds_a_node() {
        let mut graph = Graph::default();
        graph.add_node(NodeRecord::new()).unwrap();
        let parsed: Result<Vec<Record>, _> =
            serde_json::from_str(r#"[{"title":"ok"}, {"source":0}]"#);
        assert!(parsed.is_err());
        assert_eq!(graph.nodes().len(), 1);

        let records: Vec<Record> =
            serde_json::from_str(r#"[{"title":"ok"}, {"source":0,"target":1}]"#).unwrap();
        assert!(matches!(records[1], Record::Link(_)));
        let results = graph.add(records);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.links().len(), 1);
    }

    #[test]
    fn empty_snapshot_parses() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
