//! Geometry and graph engine for interactive node-link diagram editors.
//!
//! A [`Graph`] owns shaped nodes and routed links. It hands out ids, keeps
//! its indices and selection consistent under mutation, routes links between
//! node outlines and maintains a padded bounding box of the layout. Drawing,
//! gestures, text measurement and the force simulation stay outside: text
//! metrics come in through [`TextMetrics`] and layout ticks through
//! [`Simulation`].
//!
//! ```
//! use nodelink::{Graph, GraphConfig, LinkRecord, NodeRecord};
//!
//! let mut graph = Graph::new(GraphConfig::default().directed(true));
//! let a = graph.add_node(NodeRecord::new().at(0.0, 0.0).sized(20.0, 20.0))?;
//! let b = graph.add_node(NodeRecord::new().at(100.0, 0.0).sized(10.0, 10.0))?;
//! let link = graph.add_link(LinkRecord::new(a, b))?;
//!
//! assert_eq!(link.as_str(), "0-1");
//! assert_eq!(graph.link(&link).unwrap().path.to_string(), "M10,0L95,0");
//! # Ok::<(), nodelink::GraphError>(())
//! ```

pub mod errors;
pub mod geometry;
pub mod graph;
mod log;
pub mod types;

pub use errors::{Endpoint, EntityKind, GraphError, SnapshotError};
pub use geometry::{
    Circle, ContainerSize, Line, LinkPath, MonospaceMetrics, NodeShape, PathData, PathKind, Rect, Shape,
    TextMetrics,
};
pub use graph::{
    BBox, ElementRef, Graph, GraphConfig, Link, LinkId, LinkOptions, LinkRecord, Node, NodeId, NodeOptions,
    NodeRecord, Placement, Record, Selection, Simulation, Snapshot,
};
pub use types::{Angle, Point, Size};
