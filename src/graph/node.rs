//! Graph nodes and their import records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{NodeShape, PathData, Shape, TextMetrics};
use crate::types::{Angle, Point, Size};

/// Node identifier. Serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// A shaped node, centered on `(x, y)`.
///
/// Position and size are public: layout and user interaction move and
/// resize nodes directly. `text_size` is derived state written by
/// [`Shape::fit_title_inside`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: Shape,
    pub title: String,
    /// Opaque user payload, carried through export unchanged
    pub data: Value,
    /// Size of the box the title is laid out in, once fitted
    pub text_size: Option<Size>,
    /// Title at the last fit
    pub(crate) prev_title: Option<String>,
}

impl Node {
    /// A circle node titled with its id.
    pub fn new(id: NodeId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Node {
            id,
            x,
            y,
            width,
            height,
            shape: Shape::default(),
            title: id.to_string(),
            data: Value::Null,
            text_size: None,
            prev_title: None,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Outline relative to the node center.
    pub fn path(&self) -> PathData {
        self.shape.path(self)
    }

    /// Boundary point in direction `angle`.
    pub fn point_at(&self, angle: &Angle) -> Point {
        self.shape.get_point(self, angle)
    }

    /// Where a straight line toward `other`'s center leaves this node.
    pub fn intersect(&self, other: &Node) -> Option<Point> {
        self.shape.intersect(self, other)
    }

    /// Resize to fit the title. No-op when the title has not changed since
    /// the last fit; returns whether the node was refitted.
    pub fn fit_title_inside(&mut self, metrics: &dyn TextMetrics) -> bool {
        let shape = self.shape;
        shape.fit_title_inside(self, metrics)
    }
}

/// Node import/export record. Every field is optional on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl NodeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn new_node_defaults() {
        let n = Node::new(NodeId(7), 1.0, 2.0, 30.0, 40.0);
        assert_eq!(n.id(), NodeId(7));
        assert_eq!(n.title, "7");
        assert_eq!(n.shape, Shape::default());
        assert_eq!(n.center(), Point::new(1.0, 2.0));
        assert_eq!(n.size(), Size::new(30.0, 40.0));
        assert!(n.data.is_null());
        assert_eq!(n.text_size, None);
    }

    #[test]
    fn record_builder_and_json() {
        let record = NodeRecord::new()
            .with_id(3)
            .at(10.0, -5.0)
            .with_shape(Shape::Rect(Rect::new(2.0)))
            .with_data(serde_json::json!({"k": 1}));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"x":10.0,"y":-5.0,"shape":{"class":"Rect","aspect":2.0},"data":{"k":1}}"#
        );
        let back: NodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn empty_record_parses() {
        let record: NodeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, NodeRecord::default());
    }
}
