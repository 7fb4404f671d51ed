//! Id assignment and entity storage.
//!
//! Nodes and links live in insertion-ordered vectors (draw order) with a
//! hash index from id to position. Links refer to nodes by id only.

use std::collections::HashMap;

use crate::errors::{EntityKind, GraphError};
use crate::geometry::PathData;

use super::link::{Link, LinkId};
use super::node::{Node, NodeId};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    links: Vec<Link>,
    link_index: HashMap<LinkId, usize>,
    /// Lowest id never handed out or registered
    next_node_id: u64,
    /// Set once `u64::MAX` has been registered
    ids_exhausted: bool,
}

impl Registry {
    /// `requested` if given, else one past the highest id ever registered
    /// (0 for a fresh registry). Freed ids are not handed out again until
    /// `u64::MAX` has been used; after that the lowest free id is returned.
    pub fn assign_node_id(&self, requested: Option<NodeId>) -> NodeId {
        if let Some(id) = requested {
            return id;
        }
        if !self.ids_exhausted {
            return NodeId(self.next_node_id);
        }
        (0..u64::MAX)
            .map(NodeId)
            .find(|id| !self.node_index.contains_key(id))
            .unwrap_or(NodeId(u64::MAX))
    }

    /// Append and index `node`. Fails without mutating on a duplicate id.
    pub fn register_node(&mut self, node: Node) -> Result<&Node, GraphError> {
        let id = node.id();
        if self.node_index.contains_key(&id) {
            return Err(GraphError::duplicate(EntityKind::Node, id));
        }
        match id.0.checked_add(1) {
            Some(next) => self.next_node_id = self.next_node_id.max(next),
            None => self.ids_exhausted = true,
        }
        let idx = self.nodes.len();
        self.node_index.insert(id, idx);
        self.nodes.push(node);
        Ok(&self.nodes[idx])
    }

    /// Append and index `link`. Fails without mutating on a duplicate id.
    /// Endpoints must already be checked by the caller.
    pub fn register_link(&mut self, link: Link) -> Result<&Link, GraphError> {
        if self.link_index.contains_key(link.id()) {
            return Err(GraphError::duplicate(EntityKind::Link, link.id()));
        }
        let idx = self.links.len();
        self.link_index.insert(link.id().clone(), idx);
        self.links.push(link);
        Ok(&self.links[idx])
    }

    /// Remove a node. Incident links are the caller's responsibility.
    pub fn unregister_node(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.node_index.remove(&id)?;
        let node = self.nodes.remove(idx);
        for (i, n) in self.nodes.iter().enumerate().skip(idx) {
            self.node_index.insert(n.id(), i);
        }
        Some(node)
    }

    pub fn unregister_link(&mut self, id: &LinkId) -> Option<Link> {
        let idx = self.link_index.remove(id)?;
        let link = self.links.remove(idx);
        for (i, l) in self.links.iter().enumerate().skip(idx) {
            self.link_index.insert(l.id().clone(), i);
        }
        Some(link)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.node_index.get(&id).map(|&i| &mut self.nodes[i])
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.link_index.get(id).map(|&i| &self.links[i])
    }

    pub fn link_mut(&mut self, id: &LinkId) -> Option<&mut Link> {
        self.link_index.get(id).map(|&i| &mut self.links[i])
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn contains_link(&self, id: &LinkId) -> bool {
        self.link_index.contains_key(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Geometry may change; ids may not.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Node slice and link slice together, for simulation steps.
    pub fn split_mut(&mut self) -> (&mut [Node], &[Link]) {
        (&mut self.nodes, &self.links)
    }

    /// Ids of links with `node` as an endpoint, in draw order.
    pub fn incident_links(&self, node: NodeId) -> Vec<LinkId> {
        self.links
            .iter()
            .filter(|l| l.touches(node))
            .map(|l| l.id().clone())
            .collect()
    }

    /// Route one link against its current endpoints; returns the text path.
    pub fn route_link(&mut self, id: &LinkId) -> Option<PathData> {
        let idx = *self.link_index.get(id)?;
        let link = &mut self.links[idx];
        let source = self.node_index.get(&link.source()).map(|&i| &self.nodes[i])?;
        let target = self.node_index.get(&link.target()).map(|&i| &self.nodes[i])?;
        Some(link.route(source, target))
    }

    /// Route every link.
    pub fn route_all(&mut self) {
        let nodes = &self.nodes;
        let index = &self.node_index;
        for link in &mut self.links {
            let source = index.get(&link.source()).map(|&i| &nodes[i]);
            let target = index.get(&link.target()).map(|&i| &nodes[i]);
            if let (Some(source), Some(target)) = (source, target) {
                link.route(source, target);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
