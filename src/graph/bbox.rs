//! Padded bounding box of the node set.
//!
//! Each node contributes the span `[x - padding, x + width + padding]` (and
//! likewise on y). `recompute` scans every node; `extend` widens an existing
//! box by one node and can never shrink it.

use serde::{Deserialize, Serialize};

use crate::types::Point;

use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Full scan. All-zero box when there are no nodes.
    pub fn recompute<'a>(nodes: impl IntoIterator<Item = &'a Node>, padding: f64) -> BBox {
        let mut nodes = nodes.into_iter();
        let Some(first) = nodes.next() else {
            return BBox::default();
        };
        nodes.fold(BBox::of_node(first, padding), |bbox, node| bbox.extend(node, padding))
    }

    /// Widen to include `node`.
    pub fn extend(self, node: &Node, padding: f64) -> BBox {
        let other = BBox::of_node(node, padding);
        BBox {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    fn of_node(node: &Node, padding: f64) -> BBox {
        BBox {
            min: Point::new(node.x - padding, node.y - padding),
            max: Point::new(node.x + node.width + padding, node.y + node.height + padding),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether `other` lies inside this box.
    pub fn contains(&self, other: &BBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}
