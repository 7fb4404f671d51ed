//! The graph: node and link storage, mutation, selection and the update
//! passes that keep derived geometry current.
//!
//! Two geometry paths:
//! - Membership changes (add, remove, clear) and [`Graph::update`]
//!   recompute the bounding box from every node.
//! - Single-node edits ([`Graph::move_node`], [`Graph::resize_node`],
//!   [`Graph::update_node`]) only extend it.

mod bbox;
mod config;
mod link;
mod node;
mod registry;
mod simulation;
mod snapshot;

pub use bbox::BBox;
pub use config::{GraphConfig, LinkOptions, NodeOptions, Placement};
pub use link::{Link, LinkId, LinkRecord};
pub use node::{Node, NodeId, NodeRecord};
pub use simulation::Simulation;
pub use snapshot::{ElementRef, Record, Snapshot};

use registry::Registry;

use crate::errors::{Endpoint, EntityKind, GraphError};
use crate::geometry::{PathData, PathKind, Shape, TextMetrics};

/// Currently selected node and link, each live or `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub node: Option<NodeId>,
    pub link: Option<LinkId>,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    config: GraphConfig,
    registry: Registry,
    selection: Selection,
    bbox: BBox,
}

impl Graph {
    pub fn new(config: GraphConfig) -> Self {
        Graph {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Nodes in insertion (draw) order.
    pub fn nodes(&self) -> &[Node] {
        self.registry.nodes()
    }

    /// Links in insertion (draw) order.
    pub fn links(&self) -> &[Link] {
        self.registry.links()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.registry.node(id)
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.registry.link(id)
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// Id a link between `source` and `target` gets in this graph.
    pub fn link_id(&self, source: NodeId, target: NodeId) -> LinkId {
        LinkId::derive(source, target, self.config.directed)
    }

    // ========================================================================
    // Adding
    // ========================================================================

    pub fn add_node(&mut self, record: NodeRecord) -> Result<NodeId, GraphError> {
        let id = self.insert_node(record)?;
        self.recompute_bbox();
        Ok(id)
    }

    pub fn add_link(&mut self, record: LinkRecord) -> Result<LinkId, GraphError> {
        self.insert_link(record)
    }

    /// Sequential `add_node` calls with a single bbox recompute.
    pub fn add_nodes(&mut self, records: impl IntoIterator<Item = NodeRecord>) -> Vec<Result<NodeId, GraphError>> {
        let results = records.into_iter().map(|r| self.insert_node(r)).collect();
        self.recompute_bbox();
        results
    }

    pub fn add_links(&mut self, records: impl IntoIterator<Item = LinkRecord>) -> Vec<Result<LinkId, GraphError>> {
        records.into_iter().map(|r| self.insert_link(r)).collect()
    }

    /// Add mixed node and link records in order.
    pub fn add(&mut self, records: impl IntoIterator<Item = Record>) -> Vec<Result<ElementRef, GraphError>> {
        let results = records
            .into_iter()
            .map(|record| match record {
                Record::Node(r) => self.insert_node(r).map(ElementRef::Node),
                Record::Link(r) => self.insert_link(r).map(ElementRef::Link),
            })
            .collect();
        self.recompute_bbox();
        results
    }

    fn insert_node(&mut self, record: NodeRecord) -> Result<NodeId, GraphError> {
        let id = self.registry.assign_node_id(record.id);
        if self.registry.contains_node(id) {
            crate::log::warn!(id = %id, "duplicate node id rejected");
            return Err(GraphError::duplicate(EntityKind::Node, id));
        }

        let opts = &self.config.node;
        let placed = self.config.placement.position(self.nodes().len());
        let mut node = Node::new(
            id,
            finite_or(record.x, placed.x),
            finite_or(record.y, placed.y),
            opts.size(record.width),
            opts.size(record.height),
        )
        .with_shape(record.shape.unwrap_or(opts.shape));
        if let Some(title) = record.title {
            node.title = title;
        }
        node.data = record.data;

        self.registry.register_node(node)?;
        crate::log::debug!(id = %id, "node added");
        Ok(id)
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn insert_link(&mut self, record: LinkRecord) -> Result<LinkId, GraphError> {
        if !self.registry.contains_node(record.source) {
            crate::log::warn!(node = %record.source, "link source not found");
            return Err(GraphError::invalid_endpoint(Endpoint::Source, record.source));
        }
        if !self.registry.contains_node(record.target) {
            crate::log::warn!(node = %record.target, "link target not found");
            return Err(GraphError::invalid_endpoint(Endpoint::Target, record.target));
        }

        let id = self.link_id(record.source, record.target);
        if let Some(requested) = record.id.as_ref().filter(|r| **r != id) {
            crate::log::warn!(requested = %requested, derived = %id, "link id replaced by derived id");
        }
        if self.registry.contains_link(&id) {
            crate::log::warn!(id = %id, "duplicate link id rejected");
            return Err(GraphError::duplicate(EntityKind::Link, &id));
        }

        let mut link = Link::new(id.clone(), record.source, record.target)
            .with_shape(record.shape.unwrap_or(self.config.link.shape));
        if let Some(title) = record.title {
            link.title = title;
        }
        link.data = record.data;

        self.registry.register_link(link)?;
        self.registry.route_link(&id);
        crate::log::debug!(id = %id, "link added");
        Ok(id)
    }

    // ========================================================================
    // Removing
    // ========================================================================

    /// Remove a node and every link touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let node = self.detach_node(id)?;
        self.recompute_bbox();
        Ok(node)
    }

    pub fn remove_link(&mut self, id: &LinkId) -> Result<Link, GraphError> {
        if self.selection.link.as_ref() == Some(id) {
            self.selection.link = None;
        }
        let link = self
            .registry
            .unregister_link(id)
            .ok_or_else(|| GraphError::not_found(EntityKind::Link, id))?;
        crate::log::debug!(id = %id, "link removed");
        Ok(link)
    }

    /// Sequential removals with a single bbox recompute.
    pub fn remove(&mut self, refs: impl IntoIterator<Item = ElementRef>) -> Vec<Result<(), GraphError>> {
        let results = refs
            .into_iter()
            .map(|r| match r {
                ElementRef::Node(id) => self.detach_node(id).map(|_| ()),
                ElementRef::Link(id) => self.remove_link(&id).map(|_| ()),
            })
            .collect();
        self.recompute_bbox();
        results
    }

    fn detach_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        if !self.registry.contains_node(id) {
            return Err(GraphError::not_found(EntityKind::Node, id));
        }
        if self.selection.node == Some(id) {
            self.selection.node = None;
        }
        let incident = self.registry.incident_links(id);
        for link in &incident {
            self.remove_link(link)?;
        }
        let node = self
            .registry
            .unregister_node(id)
            .ok_or_else(|| GraphError::not_found(EntityKind::Node, id))?;
        crate::log::debug!(id = %id, links = incident.len(), "node removed");
        Ok(node)
    }

    /// Remove everything; ids start from 0 again.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.selection = Selection::default();
        self.bbox = BBox::default();
        crate::log::debug!("graph cleared");
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        if !self.registry.contains_node(id) {
            return Err(GraphError::not_found(EntityKind::Node, id));
        }
        self.selection.node = Some(id);
        Ok(())
    }

    pub fn select_link(&mut self, id: &LinkId) -> Result<(), GraphError> {
        if !self.registry.contains_link(id) {
            return Err(GraphError::not_found(EntityKind::Link, id));
        }
        self.selection.link = Some(id.clone());
        Ok(())
    }

    pub fn select(&mut self, element: &ElementRef) -> Result<(), GraphError> {
        match element {
            ElementRef::Node(id) => self.select_node(*id),
            ElementRef::Link(id) => self.select_link(id),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    // ========================================================================
    // Edits
    // ========================================================================

    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        node.x = x;
        node.y = y;
        self.refresh_node(id);
        Ok(())
    }

    /// Sizes go through the same defaulting and floor as imported records.
    pub fn resize_node(&mut self, id: NodeId, width: f64, height: f64) -> Result<(), GraphError> {
        let width = self.config.node.size(Some(width));
        let height = self.config.node.size(Some(height));
        let node = self.node_mut(id)?;
        node.width = width;
        node.height = height;
        self.refresh_node(id);
        Ok(())
    }

    /// Takes effect on the next update pass.
    pub fn set_node_title(&mut self, id: NodeId, title: impl Into<String>) -> Result<(), GraphError> {
        self.node_mut(id)?.title = title.into();
        Ok(())
    }

    pub fn set_node_shape(&mut self, id: NodeId, shape: Shape) -> Result<(), GraphError> {
        self.node_mut(id)?.shape = shape;
        crate::log::debug!(id = %id, shape = shape.name(), "node shape changed");
        self.refresh_node(id);
        Ok(())
    }

    pub fn set_link_title(&mut self, id: &LinkId, title: impl Into<String>) -> Result<(), GraphError> {
        self.link_mut(id)?.title = title.into();
        Ok(())
    }

    pub fn set_link_shape(&mut self, id: &LinkId, shape: PathKind) -> Result<(), GraphError> {
        self.link_mut(id)?.shape = shape;
        self.registry.route_link(id);
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.registry
            .node_mut(id)
            .ok_or_else(|| GraphError::not_found(EntityKind::Node, id))
    }

    fn link_mut(&mut self, id: &LinkId) -> Result<&mut Link, GraphError> {
        self.registry
            .link_mut(id)
            .ok_or_else(|| GraphError::not_found(EntityKind::Link, id))
    }

    // ========================================================================
    // Update passes
    // ========================================================================

    /// Refit one node's title, reroute its links and extend the bbox.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn update_node(&mut self, id: NodeId, metrics: &dyn TextMetrics) -> Result<(), GraphError> {
        let refitted = self.node_mut(id)?.fit_title_inside(metrics);
        crate::log::debug!(id = %id, refitted, "node updated");
        self.refresh_node(id);
        Ok(())
    }

    /// Refit every title, reroute every link and recompute the bbox.
    pub fn update(&mut self, metrics: &dyn TextMetrics) {
        for node in self.registry.nodes_mut() {
            node.fit_title_inside(metrics);
        }
        self.refresh_geometry();
    }

    /// Reroute every link and recompute the bbox, leaving sizes alone.
    pub fn refresh_geometry(&mut self) {
        self.registry.route_all();
        self.recompute_bbox();
    }

    /// Run one simulation tick, then refresh geometry.
    pub fn step_simulation<S: Simulation + ?Sized>(&mut self, simulation: &mut S) {
        let (nodes, links) = self.registry.split_mut();
        simulation.step(nodes, links);
        self.refresh_geometry();
    }

    /// Reroute `id`'s links and widen the bbox around it.
    fn refresh_node(&mut self, id: NodeId) {
        for link in self.registry.incident_links(id) {
            self.registry.route_link(&link);
        }
        if let Some(node) = self.registry.node(id) {
            self.bbox = self.bbox.extend(node, self.config.bbox_padding);
        }
    }

    fn recompute_bbox(&mut self) {
        self.bbox = BBox::recompute(self.registry.nodes(), self.config.bbox_padding);
    }

    // ========================================================================
    // Rendering queries
    // ========================================================================

    /// Outline of a node, relative to its center.
    pub fn node_path(&self, id: NodeId) -> Result<PathData, GraphError> {
        self.registry
            .node(id)
            .map(Node::path)
            .ok_or_else(|| GraphError::not_found(EntityKind::Node, id))
    }

    /// Reroute a link and return its text path; the draw path is left on
    /// the link.
    pub fn route_link(&mut self, id: &LinkId) -> Result<PathData, GraphError> {
        self.registry
            .route_link(id)
            .ok_or_else(|| GraphError::not_found(EntityKind::Link, id))
    }
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    }
}
